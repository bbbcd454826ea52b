use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the seven fixed provinces offered by the location selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Province {
    #[default]
    #[serde(rename = "Province 1")]
    P1,
    #[serde(rename = "Province 2")]
    P2,
    #[serde(rename = "Province 3")]
    P3,
    #[serde(rename = "Province 4")]
    P4,
    #[serde(rename = "Province 5")]
    P5,
    #[serde(rename = "Province 6")]
    P6,
    #[serde(rename = "Province 7")]
    P7,
}

static ALL_PROVINCES: &[Province] = &[
    Province::P1,
    Province::P2,
    Province::P3,
    Province::P4,
    Province::P5,
    Province::P6,
    Province::P7,
];

impl Province {
    /// Returns the display label of this province.
    pub fn label(&self) -> &'static str {
        match self {
            Province::P1 => "Province 1",
            Province::P2 => "Province 2",
            Province::P3 => "Province 3",
            Province::P4 => "Province 4",
            Province::P5 => "Province 5",
            Province::P6 => "Province 6",
            Province::P7 => "Province 7",
        }
    }

    /// Returns all provinces in numeric order.
    pub fn all() -> &'static [Province] {
        ALL_PROVINCES
    }
}

#[mutants::skip]
impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
