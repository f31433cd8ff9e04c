use super::ids::{AtomId, ChainId, ResidueId};
use super::traits::{AtomicStructure, ResidueSet, ResiduicStructure};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Helix classification codes 1 to 10 of the structure format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HelixClass {
    #[default]
    RightHandedAlpha,
    RightHandedOmega,
    RightHandedPi,
    RightHandedGamma,
    RightHanded310,
    LeftHandedAlpha,
    LeftHandedOmega,
    LeftHandedGamma,
    Ribbon27,
    Polyproline,
}

impl HelixClass {
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => HelixClass::RightHandedAlpha,
            2 => HelixClass::RightHandedOmega,
            3 => HelixClass::RightHandedPi,
            4 => HelixClass::RightHandedGamma,
            5 => HelixClass::RightHanded310,
            6 => HelixClass::LeftHandedAlpha,
            7 => HelixClass::LeftHandedOmega,
            8 => HelixClass::LeftHandedGamma,
            9 => HelixClass::Ribbon27,
            10 => HelixClass::Polyproline,
            _ => return None,
        })
    }

    pub fn code(self) -> u8 {
        match self {
            HelixClass::RightHandedAlpha => 1,
            HelixClass::RightHandedOmega => 2,
            HelixClass::RightHandedPi => 3,
            HelixClass::RightHandedGamma => 4,
            HelixClass::RightHanded310 => 5,
            HelixClass::LeftHandedAlpha => 6,
            HelixClass::LeftHandedOmega => 7,
            HelixClass::LeftHandedGamma => 8,
            HelixClass::Ribbon27 => 9,
            HelixClass::Polyproline => 10,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid helix class: '{0}'")]
pub struct ParseHelixClassError(String);

impl FromStr for HelixClass {
    type Err = ParseHelixClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "right-handed alpha" => Ok(HelixClass::RightHandedAlpha),
            "right-handed omega" => Ok(HelixClass::RightHandedOmega),
            "right-handed pi" => Ok(HelixClass::RightHandedPi),
            "right-handed gamma" => Ok(HelixClass::RightHandedGamma),
            "right-handed 3 - 10" => Ok(HelixClass::RightHanded310),
            "left-handed alpha" => Ok(HelixClass::LeftHandedAlpha),
            "left-handed omega" => Ok(HelixClass::LeftHandedOmega),
            "left-handed gamma" => Ok(HelixClass::LeftHandedGamma),
            "2 - 7 ribbon/helix" => Ok(HelixClass::Ribbon27),
            "polyproline" => Ok(HelixClass::Polyproline),
            _ => Err(ParseHelixClassError(s.to_string())),
        }
    }
}

impl fmt::Display for HelixClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                HelixClass::RightHandedAlpha => "Right-handed alpha",
                HelixClass::RightHandedOmega => "Right-handed omega",
                HelixClass::RightHandedPi => "Right-handed pi",
                HelixClass::RightHandedGamma => "Right-handed gamma",
                HelixClass::RightHanded310 => "Right-handed 3 - 10",
                HelixClass::LeftHandedAlpha => "Left-handed alpha",
                HelixClass::LeftHandedOmega => "Left-handed omega",
                HelixClass::LeftHandedGamma => "Left-handed gamma",
                HelixClass::Ribbon27 => "2 - 7 ribbon/helix",
                HelixClass::Polyproline => "Polyproline",
            }
        )
    }
}

/// Orientation of a strand relative to the previous strand of its sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrandSense {
    #[default]
    First,
    Parallel,
    Antiparallel,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid strand sense: {0}")]
pub struct ParseStrandSenseError(i8);

impl TryFrom<i8> for StrandSense {
    type Error = ParseStrandSenseError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(StrandSense::First),
            1 => Ok(StrandSense::Parallel),
            -1 => Ok(StrandSense::Antiparallel),
            other => Err(ParseStrandSenseError(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Helix {
    pub serial: usize,
    pub name: String,
    pub chain_id: ChainId,
    pub class: HelixClass,
    pub comment: String,
    pub(crate) residues: ResidueSet,
}

impl AtomicStructure for Helix {
    fn atom_ids(&self) -> &[AtomId] {
        self.residues.atom_ids()
    }
}

impl ResiduicStructure for Helix {
    fn residue_ids(&self) -> &[ResidueId] {
        self.residues.residue_ids()
    }
}

/// The hydrogen-bonded atom pair aligning a strand with the previous strand.
///
/// Either side is `None` when the named atom could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub current: Option<AtomId>,
    pub previous: Option<AtomId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Strand {
    pub name: String,
    pub chain_id: ChainId,
    pub sense: StrandSense,
    /// Only strands with a predecessor in their sheet carry a registration.
    pub registration: Option<Registration>,
    pub(crate) residues: ResidueSet,
}

impl AtomicStructure for Strand {
    fn atom_ids(&self) -> &[AtomId] {
        self.residues.atom_ids()
    }
}

impl ResiduicStructure for Strand {
    fn residue_ids(&self) -> &[ResidueId] {
        self.residues.residue_ids()
    }
}

/// A beta sheet: ordered strands plus the union of their residues.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub(crate) strands: Vec<Strand>,
    pub(crate) residues: ResidueSet,
}

impl Sheet {
    pub fn strands(&self) -> &[Strand] {
        &self.strands
    }
}

impl AtomicStructure for Sheet {
    fn atom_ids(&self) -> &[AtomId] {
        self.residues.atom_ids()
    }
}

impl ResiduicStructure for Sheet {
    fn residue_ids(&self) -> &[ResidueId] {
        self.residues.residue_ids()
    }
}

/// Position of a strand inside the model's sheet list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrandRef {
    pub sheet: usize,
    pub strand: usize,
}
