use phf::{Map, phf_map};

/// Standard atomic masses in Daltons, keyed by upper-case element symbol.
///
/// `X` (unknown placeholder) and `D` (deuterium written as its own symbol in
/// some depositions) are massless so that structures carrying them still load.
#[rustfmt::skip]
static ATOMIC_MASSES: Map<&'static str, f64> = phf_map! {
    "H"  => 1.0079,   "HE" => 4.0026,   "LI" => 6.941,    "BE" => 9.0122,
    "B"  => 10.811,   "C"  => 12.0107,  "N"  => 14.0067,  "O"  => 15.9994,
    "F"  => 18.9984,  "NE" => 20.1797,  "NA" => 22.9897,  "MG" => 24.305,
    "AL" => 26.9815,  "SI" => 28.0855,  "P"  => 30.9738,  "S"  => 32.065,
    "CL" => 35.453,   "K"  => 39.0983,  "AR" => 39.948,   "CA" => 40.078,
    "SC" => 44.9559,  "TI" => 47.867,   "V"  => 50.9415,  "CR" => 51.9961,
    "MN" => 54.938,   "FE" => 55.845,   "NI" => 58.6934,  "CO" => 58.9332,
    "CU" => 63.546,   "ZN" => 65.39,    "GA" => 69.723,   "GE" => 72.64,
    "AS" => 74.9216,  "SE" => 78.96,    "BR" => 79.904,   "KR" => 83.8,
    "RB" => 85.4678,  "SR" => 87.62,    "Y"  => 88.9059,  "ZR" => 91.224,
    "NB" => 92.9064,  "MO" => 95.94,    "TC" => 98.0,     "RU" => 101.07,
    "RH" => 102.9055, "PD" => 106.42,   "AG" => 107.8682, "CD" => 112.411,
    "IN" => 114.818,  "SN" => 118.71,   "SB" => 121.76,   "I"  => 126.9045,
    "TE" => 127.6,    "XE" => 131.293,  "CS" => 132.9055, "BA" => 137.327,
    "LA" => 138.9055, "CE" => 140.116,  "PR" => 140.9077, "ND" => 144.24,
    "PM" => 145.0,    "SM" => 150.36,   "EU" => 151.964,  "GD" => 157.25,
    "TB" => 158.9253, "DY" => 162.5,    "HO" => 164.9303, "ER" => 167.259,
    "TM" => 168.9342, "YB" => 173.04,   "LU" => 174.967,  "HF" => 178.49,
    "TA" => 180.9479, "W"  => 183.84,   "RE" => 186.207,  "OS" => 190.23,
    "IR" => 192.217,  "PT" => 195.078,  "AU" => 196.9665, "HG" => 200.59,
    "TL" => 204.3833, "PB" => 207.2,    "BI" => 208.9804, "PO" => 209.0,
    "AT" => 210.0,    "RN" => 222.0,    "FR" => 223.0,    "RA" => 226.0,
    "AC" => 227.0,    "PA" => 231.0359, "TH" => 232.0381, "NP" => 237.0,
    "U"  => 238.0289, "AM" => 243.0,    "PU" => 244.0,    "CM" => 247.0,
    "BK" => 247.0,    "CF" => 251.0,    "ES" => 252.0,    "FM" => 257.0,
    "MD" => 258.0,    "NO" => 259.0,    "RF" => 261.0,    "LR" => 262.0,
    "DB" => 262.0,    "BH" => 264.0,    "SG" => 266.0,    "MT" => 268.0,
    "RG" => 272.0,    "HS" => 277.0,
    "X"  => 0.0,      "D"  => 0.0,
};

/// Looks up the atomic mass of an element symbol.
///
/// The lookup trims surrounding whitespace and ignores case, so `"Fe"`, `"FE"`
/// and `" fe "` all resolve to iron.
pub fn atomic_mass(symbol: &str) -> Option<f64> {
    ATOMIC_MASSES
        .get(symbol.trim().to_ascii_uppercase().as_str())
        .copied()
}

/// Returns `true` if the symbol denotes hydrogen (the only element excluded
/// from heavy-atom histograms).
pub fn is_hydrogen(symbol: &str) -> bool {
    symbol.trim().eq_ignore_ascii_case("H")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_mass_resolves_common_biological_elements() {
        assert_eq!(atomic_mass("C"), Some(12.0107));
        assert_eq!(atomic_mass("N"), Some(14.0067));
        assert_eq!(atomic_mass("O"), Some(15.9994));
        assert_eq!(atomic_mass("S"), Some(32.065));
        assert_eq!(atomic_mass("FE"), Some(55.845));
    }

    #[test]
    fn atomic_mass_is_case_insensitive_and_trims_whitespace() {
        assert_eq!(atomic_mass("fe"), atomic_mass("FE"));
        assert_eq!(atomic_mass(" Zn "), Some(65.39));
    }

    #[test]
    fn atomic_mass_returns_none_for_unknown_symbols() {
        assert_eq!(atomic_mass("QQ"), None);
        assert_eq!(atomic_mass(""), None);
    }

    #[test]
    fn placeholder_symbols_are_massless() {
        assert_eq!(atomic_mass("X"), Some(0.0));
        assert_eq!(atomic_mass("D"), Some(0.0));
    }

    #[test]
    fn is_hydrogen_matches_only_hydrogen() {
        assert!(is_hydrogen("H"));
        assert!(is_hydrogen("h"));
        assert!(!is_hydrogen("HG"));
        assert!(!is_hydrogen("D"));
    }
}
