use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PullApartError;

macro_rules! key_codes {
    ($($key:ident),+ $(,)?) => {
        /// Keys that can be bound to the pull apart action, named the way the
        /// game engine names them.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum KeyCode {
            $($key),+
        }

        impl KeyCode {
            pub const ALL: &'static [KeyCode] = &[$(KeyCode::$key),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(KeyCode::$key => stringify!($key)),+
                }
            }
        }
    };
}

key_codes! {
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Alpha0, Alpha1, Alpha2, Alpha3, Alpha4, Alpha5, Alpha6, Alpha7, Alpha8, Alpha9,
}

impl Default for KeyCode {
    fn default() -> Self {
        KeyCode::F4
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyCode {
    type Err = PullApartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        KeyCode::ALL
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PullApartError::UnknownKey(s.to_string()))
    }
}

impl TryFrom<String> for KeyCode {
    type Error = PullApartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyCode> for String {
    fn from(key: KeyCode) -> Self {
        key.as_str().to_string()
    }
}
