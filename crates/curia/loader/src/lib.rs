//! Curia Loader - From parsed legislative documents to a populated store.
//!
//! Document parsing itself (the XML layer) lives outside this workspace;
//! what arrives here is its result: norm records, sanction records, and link
//! records, each with conditions already in formula form and content still
//! as literal text. [`load`] replays those records against a
//! [`Legislation`] store under the ingestion contract:
//!
//! - duplicate norm/sanction records are silently ignored (counted, not
//!   errored);
//! - link records naming an id that was never added, or repeating an
//!   existing pair, are silently ignored;
//! - content text that parses under neither grammar is a record-level
//!   error - malformed text is rejected here, at the parsing boundary, and
//!   nowhere deeper.
//!
//! All record types are serde-(de)serializable, so a JSON rendition of a
//! parsed document round-trips through [`LegislationDocument`].

#![deny(unsafe_code)]

use curia_legislation::Legislation;
use curia_terms::Formula;
use curia_types::{
    Content, ContentParseError, Identifier, Norm, RuleState, Sanction, SanctionCategory,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("norm {id}: {source}")]
    NormContent {
        id: Identifier,
        source: ContentParseError,
    },
    #[error("sanction {id}: {source}")]
    SanctionContent {
        id: Identifier,
        source: ContentParseError,
    },
}

/// One norm as extracted from a legislative document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormRecord {
    pub id: Identifier,
    /// Omitted in the document means enabled.
    #[serde(default)]
    pub state: RuleState,
    pub condition: Formula,
    pub issuer: Identifier,
    /// Content literal text; parsed during ingestion with this record's id
    /// and condition in scope.
    pub content: String,
}

/// One sanction as extracted from a legislative document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanctionRecord {
    pub id: Identifier,
    #[serde(default)]
    pub state: RuleState,
    pub condition: Formula,
    pub category: SanctionCategory,
    pub content: String,
}

/// One link entry: a norm id and the sanction ids answering it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub norm: Identifier,
    pub sanctions: Vec<Identifier>,
}

/// The parsed form of one legislative document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegislationDocument {
    #[serde(default)]
    pub norms: Vec<NormRecord>,
    #[serde(default)]
    pub sanctions: Vec<SanctionRecord>,
    #[serde(default)]
    pub links: Vec<LinkRecord>,
}

/// What ingestion did: additions per kind, plus everything the contract
/// told us to ignore.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub norms_added: usize,
    pub sanctions_added: usize,
    pub links_added: usize,
    pub ignored_norms: usize,
    pub ignored_sanctions: usize,
    pub ignored_links: usize,
}

/// Ingest a parsed document into `legislation`.
///
/// Records are applied in document order: norms, then sanctions, then
/// links. The only failure is content text that parses under neither
/// grammar; every other anomaly is counted in the report and skipped.
pub fn load(
    legislation: &Legislation,
    document: LegislationDocument,
) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();

    for record in document.norms {
        let content = Content::parse_scoped(&record.content, &record.id, &record.condition)
            .map_err(|source| LoadError::NormContent {
                id: record.id.clone(),
                source,
            })?;
        let norm = Norm::new(
            record.id,
            record.state,
            record.condition,
            record.issuer,
            content,
        );
        if legislation.add_norm(norm) {
            report.norms_added += 1;
        } else {
            report.ignored_norms += 1;
        }
    }

    for record in document.sanctions {
        let content = Content::parse_scoped(&record.content, &record.id, &record.condition)
            .map_err(|source| LoadError::SanctionContent {
                id: record.id.clone(),
                source,
            })?;
        let sanction = Sanction::new(
            record.id,
            record.state,
            record.condition,
            record.category,
            content,
        );
        if legislation.add_sanction(sanction) {
            report.sanctions_added += 1;
        } else {
            report.ignored_sanctions += 1;
        }
    }

    for record in document.links {
        for sanction in record.sanctions {
            if legislation.add_link(&record.norm, &sanction) {
                report.links_added += 1;
            } else {
                warn!(norm = %record.norm, sanction = %sanction, "unresolvable link ignored");
                report.ignored_links += 1;
            }
        }
    }

    Ok(report)
}
