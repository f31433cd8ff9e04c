use phf::{Map, phf_map};

/// Three-letter amino acid codes mapped to their full name and one-letter code.
#[rustfmt::skip]
static AMINO_ACID_NAMES: Map<&'static str, (&'static str, char)> = phf_map! {
    "ALA" => ("alanine", 'A'),       "ARG" => ("arginine", 'R'),
    "ASN" => ("asparagine", 'N'),    "ASP" => ("aspartate", 'D'),
    "CYS" => ("cysteine", 'C'),      "GLN" => ("glutamine", 'Q'),
    "GLU" => ("glutamate", 'E'),     "GLY" => ("glycine", 'G'),
    "HIS" => ("histidine", 'H'),     "ILE" => ("isoleucine", 'I'),
    "LEU" => ("leucine", 'L'),       "LYS" => ("lysine", 'K'),
    "MET" => ("methionine", 'M'),    "PHE" => ("phenylalanine", 'F'),
    "PRO" => ("proline", 'P'),       "SER" => ("serine", 'S'),
    "THR" => ("threonine", 'T'),     "TRP" => ("tryptophan", 'W'),
    "TYR" => ("tyrosine", 'Y'),      "VAL" => ("valine", 'V'),
};

pub fn residue_full_name(code: &str) -> Option<&'static str> {
    AMINO_ACID_NAMES
        .get(code.trim().to_ascii_uppercase().as_str())
        .map(|(name, _)| *name)
}

pub fn one_letter_code(code: &str) -> Option<char> {
    AMINO_ACID_NAMES
        .get(code.trim().to_ascii_uppercase().as_str())
        .map(|(_, letter)| *letter)
}

/// Reverse lookup from a one-letter code to the three-letter code.
pub fn three_letter_code(letter: char) -> Option<&'static str> {
    let letter = letter.to_ascii_uppercase();
    AMINO_ACID_NAMES
        .entries()
        .find(|(_, (_, l))| *l == letter)
        .map(|(code, _)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_and_letter_are_resolved_from_three_letter_code() {
        assert_eq!(residue_full_name("TRP"), Some("tryptophan"));
        assert_eq!(one_letter_code("TRP"), Some('W'));
        assert_eq!(one_letter_code("lys"), Some('K'));
    }

    #[test]
    fn three_letter_code_is_resolved_from_letter() {
        assert_eq!(three_letter_code('G'), Some("GLY"));
        assert_eq!(three_letter_code('e'), Some("GLU"));
        assert_eq!(three_letter_code('B'), None);
    }

    #[test]
    fn non_standard_residues_are_unknown() {
        assert_eq!(residue_full_name("HEM"), None);
        assert_eq!(one_letter_code("HOH"), None);
    }
}
