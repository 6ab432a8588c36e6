//! JSON wire types for the HTTP server, and the conversions from the core's
//! borrowed [`SearchResult`](crate::search::SearchResult)/[`Document`](crate::search::Document)
//! into owned, serializable data.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::search::{Document, Hit, SearchResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub pattern: String,
    #[serde(default = "default_max_hits")]
    pub max_hits: usize,
    #[serde(default = "default_max_context")]
    pub max_context: i32,
    #[serde(default)]
    pub offset: usize,
}

fn default_max_hits() -> usize {
    20
}

fn default_max_context() -> i32 {
    40
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitDto {
    pub position: i32,
    pub document_id: String,
    pub document_index: usize,
    pub context_before: Vec<u8>,
    pub context_after: Vec<u8>,
}

impl<'r, 'a> From<Hit<'r, 'a>> for HitDto {
    fn from(hit: Hit<'r, 'a>) -> HitDto {
        HitDto::from(&hit)
    }
}

impl<'r, 'a> From<&Hit<'r, 'a>> for HitDto {
    fn from(hit: &Hit<'r, 'a>) -> HitDto {
        let doc = hit.document();
        let ctx = hit.char_context(0, 0).expect("zero-length context is always valid");
        HitDto {
            position: hit.position(),
            document_id: doc.id.to_string(),
            document_index: doc.index,
            context_before: ctx.before().to_vec(),
            context_after: ctx.after().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultDto {
    pub total_hits: usize,
    pub hits: Vec<HitDto>,
}

impl SearchResultDto {
    /// Builds the DTO for hits `[offset, offset + max_hits)`, each with a
    /// character window of `max_context` bytes on either side. `max_context`
    /// comes straight from a request query parameter, so a negative value
    /// is reported as `Error::InvalidInput` rather than asserted away.
    pub fn from_result(result: &SearchResult<'_>, offset: usize, max_hits: usize, max_context: i32) -> Result<SearchResultDto> {
        let total_hits = result.size();
        let end = (offset + max_hits).min(total_hits);
        let hits = (offset.min(end)..end)
            .map(|i| {
                let hit = result.hit(i);
                let ctx = hit.char_context(max_context, max_context)?;
                Ok(HitDto {
                    position: hit.position(),
                    document_id: hit.document().id.to_string(),
                    document_index: hit.document().index,
                    context_before: ctx.before().to_vec(),
                    context_after: ctx.after().to_vec(),
                })
            })
            .collect::<Result<Vec<HitDto>>>()?;
        Ok(SearchResultDto { total_hits, hits })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDto {
    pub index: usize,
    pub id: String,
    pub content: Vec<u8>,
}

impl<'a> From<Document<'a>> for DocumentDto {
    fn from(doc: Document<'a>) -> DocumentDto {
        DocumentDto { index: doc.index, id: doc.id.to_string(), content: doc.content.to_vec() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsDto {
    pub done_crawling: bool,
    pub done_loading: bool,
    pub done_indexing: bool,
    pub indexed_files: usize,
    pub indexed_bytes: usize,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Index;

    #[test]
    fn hit_dto_carries_position_and_context() {
        let index = Index::build_single("doc", b"abracadabra".to_vec()).unwrap();
        let result = index.find(b"abra").unwrap();
        let dto = SearchResultDto::from_result(&result, 0, 10, 2).unwrap();
        assert_eq!(dto.total_hits, 2);
        assert_eq!(dto.hits.len(), 2);
    }

    #[test]
    fn from_result_respects_offset_and_max_hits() {
        let index = Index::build_single("doc", vec![b'a'; 10]).unwrap();
        let result = index.find(b"a").unwrap();
        let dto = SearchResultDto::from_result(&result, 3, 2, 0).unwrap();
        assert_eq!(dto.total_hits, 10);
        assert_eq!(dto.hits.len(), 2);
    }

    #[test]
    fn from_result_rejects_negative_context() {
        let index = Index::build_single("doc", b"abracadabra".to_vec()).unwrap();
        let result = index.find(b"abra").unwrap();
        assert!(SearchResultDto::from_result(&result, 0, 10, -1).is_err());
    }

    #[test]
    fn document_dto_round_trips_through_json() {
        let dto = DocumentDto { index: 0, id: "a".into(), content: b"hi".to_vec() };
        let json = serde_json::to_string(&dto).unwrap();
        let back: DocumentDto = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dto);
    }
}
