/// Failure of a single provider call.
///
/// None of these are fatal: the tracker logs them and carries on with the next tick.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchFailure {
    /// The node could not be reached or returned an error response.
    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("block {0} not found")]
    BlockNotFound(u64),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The provider cannot serve this kind of request.
    #[error("{0}")]
    Unsupported(&'static str),
}

impl FetchFailure {
    pub fn rpc<E: std::fmt::Display>(error: E) -> Self {
        Self::Rpc(error.to_string())
    }
}
