use crate::system_state::domain::NodeType;

/// LayerRanking policy assigning each node type a vertical layer
///
/// Layers, top to bottom:
/// 0. operating system
/// 1. infrastructure services and datastores
/// 2. runtimes and accelerators
/// 3. everything else (applications, ports, files, unknown types)
pub struct LayerRanking;

impl LayerRanking {
    /// Number of layers produced by `layer_for`
    pub const LAYER_COUNT: usize = 4;

    /// Layer used for types without a dedicated rank
    pub const FALLBACK_LAYER: u8 = 3;

    pub fn layer_for(node_type: NodeType) -> u8 {
        match node_type {
            NodeType::Os => 0,
            NodeType::Service
            | NodeType::Postgres
            | NodeType::Mysql
            | NodeType::Redis
            | NodeType::DockerImages => 1,
            NodeType::Runtime | NodeType::Python | NodeType::Nodejs | NodeType::Gpu => 2,
            NodeType::Application | NodeType::Port | NodeType::File | NodeType::Other => {
                Self::FALLBACK_LAYER
            }
        }
    }

    pub fn layer_name(layer: u8) -> &'static str {
        match layer {
            0 => "system",
            1 => "services",
            2 => "runtimes",
            _ => "other",
        }
    }
}
