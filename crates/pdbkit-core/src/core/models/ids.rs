use slotmap::new_key_type;

new_key_type! {
    pub struct AtomId;
    pub struct BondId;
    pub struct ResidueId;
    pub struct HetId;
    pub struct ChainId;
}
