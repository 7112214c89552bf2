//! Search followed by a caller-defined projection of the raw response.

use search_adapter_repository::{SearchAdapter, SearchBuilder};
use search_adapter_shared::SearchResponse;

use crate::AppError;

/// Turns a raw search response into whatever shape the caller needs.
///
/// No default mapping is provided.
pub trait SourceMapper {
    type Output;

    fn map_source(&self, response: SearchResponse) -> Result<Self::Output, AppError>;
}

/// Run `builder` against `adapter` and hand the raw response to `mapper`.
pub async fn get_source<M>(
    adapter: &SearchAdapter,
    builder: &SearchBuilder,
    mapper: &M,
) -> Result<M::Output, AppError>
where
    M: SourceMapper + ?Sized,
{
    let response = adapter.search(builder).await?;
    mapper.map_source(response)
}
