#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcDefinition {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Landmarks where the NPC can be met.
    #[cfg_attr(feature = "serde", serde(default))]
    pub landmark_ids: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    /// Candidate entry nodes in priority order. The first whose condition
    /// holds starts the encounter.
    pub start_nodes: Vec<String>,
    /// Ungated entry used when every start node is gated out.
    pub fallback_node: String,
}
