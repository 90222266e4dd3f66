use super::{RequestBuilder, TransactionRequest};
use crate::config::EnrollParams;
use crate::error::BuildError;

pub const ENROLL_MODULE: &str = "enrollment";
pub const ENROLL_FUNCTION: &str = "enroll";

/// BCS `vector<u8>` of the UTF-8 handle: ULEB128 length then the bytes
pub fn encode_identifier(identifier: &str) -> Result<Vec<u8>, BuildError> {
    if identifier.is_empty() {
        return Err(BuildError::EmptyIdentifier);
    }
    Ok(bcs::to_bytes(identifier.as_bytes())?)
}

/// `<package>::enrollment::enroll(cohort, handle)`
pub fn build_enroll_request(params: &EnrollParams) -> Result<TransactionRequest, BuildError> {
    let handle = encode_identifier(&params.github)?;

    let mut builder = RequestBuilder::new();
    let cohort = builder.object(params.cohort_object_id)?;
    let handle = builder.pure_bytes(handle)?;
    builder.move_call(
        params.package_id,
        &params.module,
        &params.function,
        vec![],
        vec![cohort, handle],
    )?;

    let request = builder.finish();
    tracing::debug!(
        call = %request.target().unwrap_or_default(),
        cohort = %params.cohort_object_id,
        "Built enroll request"
    );
    Ok(request)
}
