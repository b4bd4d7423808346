//! Reconstruction of an accepting computation from parent links.

use crate::configuration::{ConfigId, Configuration, History};
use crate::types::NtmError;

/// Walks parent links from `witness` back to the root of `history` and returns the
/// configurations root first, witness last.
///
/// # Returns
///
/// * `Err(NtmError::NoWitness)` if `witness` is `None`.
/// * `Err(NtmError::UnknownConfiguration)` if a link points outside `history`.
pub fn reconstruct(
    history: &History,
    witness: Option<ConfigId>,
) -> Result<Vec<&Configuration>, NtmError> {
    let mut next = Some(witness.ok_or(NtmError::NoWitness)?);
    let mut path = Vec::new();

    while let Some(id) = next {
        let configuration = history.get(id)?;
        path.push(configuration);
        next = configuration.parent;
    }

    path.reverse();
    Ok(path)
}
