use crate::api::ApiError;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_AUTH: i32 = 1;
pub const EXIT_NETWORK: i32 = 2;
pub const EXIT_CONFIG: i32 = 4;

/// Map an error to an exit code by looking for API failures in its chain.
///
/// Rejected credentials exit 1, transport and server failures exit 2. A
/// payload that does not parse or a resource that does not exist is bad
/// input, the same as a broken snapshot, and exits 4 with everything else.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.chain().find_map(|e| e.downcast_ref::<ApiError>()) {
        Some(ApiError::Unauthorized) => EXIT_AUTH,
        Some(ApiError::Network(_)) | Some(ApiError::Status(..)) => EXIT_NETWORK,
        Some(ApiError::NotFound(_)) | Some(ApiError::Decode(_)) | None => EXIT_CONFIG,
    }
}
