pub mod generation;

pub use generation::{
    GenerateMaterialRequest, GenerateMcqRequest, MaterialResponse, McqResponse,
};
