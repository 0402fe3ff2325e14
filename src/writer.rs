//! # Investigation Serializer
//!
//! The inverse transform: rendering an assembled [`Investigation`] back
//! into the sectioned tab-delimited layout. Each section is a bare header
//! line followed by a transposed table: one line per logical field, the
//! field name first, then one value column per entity. The first field's
//! line doubles as the table's header row. Empty entity lists still emit
//! their section, with field names and zero value columns.
//!
//! Coverage is capability-gated. Only the investigation-scoped sections are
//! implemented; requesting any other section raises
//! [`WriterError::UnsupportedSection`] instead of emitting a partial or
//! incorrect table. Check [`Section::is_supported`] before asking.
//!
//! Serialization is fail-fast but non-transactional: sections already
//! flushed before a failure stay in the sink. Callers needing atomicity use
//! [`dump_investigation_to_path`], which writes to a sibling temporary file
//! and renames on full success.

use std::fmt;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::graph::annotations::join_annotations;
use crate::model::Investigation;

/// Errors raised by the serializer.
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// The requested section has no serializer yet
    #[error("serialization of section '{0}' is not supported")]
    UnsupportedSection(Section),

    /// I/O error writing to the sink
    #[error("failed to write ISA-Tab output: {0}")]
    Io(#[from] std::io::Error),

    /// Table encoding error
    #[error("failed to encode table row: {0}")]
    Csv(#[from] csv::Error),
}

/// The sections of an investigation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// `ONTOLOGY SOURCE REFERENCE`
    OntologySourceReference,
    /// `INVESTIGATION`
    Investigation,
    /// `INVESTIGATION PUBLICATIONS`
    InvestigationPublications,
    /// `INVESTIGATION CONTACTS`
    InvestigationContacts,
    /// `STUDY`
    Study,
    /// `STUDY DESIGN DESCRIPTORS`
    StudyDesignDescriptors,
    /// `STUDY PUBLICATIONS`
    StudyPublications,
    /// `STUDY FACTORS`
    StudyFactors,
    /// `STUDY ASSAYS`
    StudyAssays,
    /// `STUDY PROTOCOLS`
    StudyProtocols,
    /// `STUDY CONTACTS`
    StudyContacts,
}

impl Section {
    /// Every section, in file order.
    pub const ALL: [Section; 11] = [
        Section::OntologySourceReference,
        Section::Investigation,
        Section::InvestigationPublications,
        Section::InvestigationContacts,
        Section::Study,
        Section::StudyDesignDescriptors,
        Section::StudyPublications,
        Section::StudyFactors,
        Section::StudyAssays,
        Section::StudyProtocols,
        Section::StudyContacts,
    ];

    /// The section's header line.
    pub fn header(self) -> &'static str {
        match self {
            Section::OntologySourceReference => "ONTOLOGY SOURCE REFERENCE",
            Section::Investigation => "INVESTIGATION",
            Section::InvestigationPublications => "INVESTIGATION PUBLICATIONS",
            Section::InvestigationContacts => "INVESTIGATION CONTACTS",
            Section::Study => "STUDY",
            Section::StudyDesignDescriptors => "STUDY DESIGN DESCRIPTORS",
            Section::StudyPublications => "STUDY PUBLICATIONS",
            Section::StudyFactors => "STUDY FACTORS",
            Section::StudyAssays => "STUDY ASSAYS",
            Section::StudyProtocols => "STUDY PROTOCOLS",
            Section::StudyContacts => "STUDY CONTACTS",
        }
    }

    /// Capability predicate: whether [`dump_section`] can render this
    /// section. Study- and assay-scoped sections are not covered yet.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            Section::OntologySourceReference
                | Section::Investigation
                | Section::InvestigationPublications
                | Section::InvestigationContacts
        )
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Write every supported section of the investigation to the sink, in file
/// order.
pub fn dump_investigation<W: Write>(
    investigation: &Investigation,
    sink: &mut W,
) -> Result<(), WriterError> {
    for section in Section::ALL.iter().filter(|s| s.is_supported()) {
        dump_section(investigation, *section, sink)?;
    }
    Ok(())
}

/// Write one section of the investigation to the sink.
///
/// Unsupported sections raise [`WriterError::UnsupportedSection`] before
/// anything is written.
pub fn dump_section<W: Write>(
    investigation: &Investigation,
    section: Section,
    sink: &mut W,
) -> Result<(), WriterError> {
    let rows = match section {
        Section::OntologySourceReference => ontology_source_reference_rows(investigation),
        Section::Investigation => investigation_rows(investigation),
        Section::InvestigationPublications => publication_rows(investigation),
        Section::InvestigationContacts => contact_rows(investigation),
        _ => return Err(WriterError::UnsupportedSection(section)),
    };

    sink.write_all(section.header().as_bytes())?;
    sink.write_all(b"\n")?;
    write_table(sink, &rows)
}

/// Serialize the investigation to `path` atomically: the sections are
/// written to a sibling temporary file which is renamed over `path` only
/// on full success.
pub fn dump_investigation_to_path(
    investigation: &Investigation,
    path: &Path,
) -> Result<(), WriterError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    dump_investigation(investigation, &mut tmp)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| WriterError::Io(e.error))?;
    info!("wrote investigation file {}", path.display());
    Ok(())
}

type Row = (&'static str, Vec<String>);

fn write_table<W: Write>(sink: &mut W, rows: &[Row]) -> Result<(), WriterError> {
    let mut table = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_writer(&mut *sink);
    for (field, values) in rows {
        let mut record = Vec::with_capacity(values.len() + 1);
        record.push((*field).to_string());
        record.extend(values.iter().cloned());
        table.write_record(&record)?;
    }
    table.flush()?;
    Ok(())
}

fn ontology_source_reference_rows(investigation: &Investigation) -> Vec<Row> {
    let refs = &investigation.ontology_source_references;
    vec![
        ("Term Source Name", refs.iter().map(|r| r.name.clone()).collect()),
        ("Term Source File", refs.iter().map(|r| r.file.clone()).collect()),
        ("Term Source Version", refs.iter().map(|r| r.version.clone()).collect()),
        (
            "Term Source Description",
            refs.iter().map(|r| r.description.clone()).collect(),
        ),
    ]
}

fn investigation_rows(investigation: &Investigation) -> Vec<Row> {
    vec![
        ("Investigation Identifier", vec![investigation.identifier.clone()]),
        ("Investigation Title", vec![investigation.title.clone()]),
        ("Investigation Description", vec![investigation.description.clone()]),
        (
            "Investigation Submission Date",
            vec![investigation.submission_date.clone()],
        ),
        (
            "Investigation Public Release Date",
            vec![investigation.public_release_date.clone()],
        ),
    ]
}

fn publication_rows(investigation: &Investigation) -> Vec<Row> {
    let pubs = &investigation.publications;
    vec![
        (
            "Investigation PubMed ID",
            pubs.iter().map(|p| p.pubmed_id.clone()).collect(),
        ),
        (
            "Investigation Publication DOI",
            pubs.iter().map(|p| p.doi.clone()).collect(),
        ),
        (
            "Investigation Publication Author List",
            pubs.iter().map(|p| p.author_list.clone()).collect(),
        ),
        (
            "Investigation Publication Title",
            pubs.iter().map(|p| p.title.clone()).collect(),
        ),
        (
            "Investigation Publication Status",
            pubs.iter().map(|p| p.status.name.clone()).collect(),
        ),
        (
            "Investigation Publication Status Term Accession Number",
            pubs.iter().map(|p| p.status.term_accession.clone()).collect(),
        ),
        (
            "Investigation Publication Status Term Source REF",
            pubs.iter().map(|p| p.status.term_source.clone()).collect(),
        ),
    ]
}

fn contact_rows(investigation: &Investigation) -> Vec<Row> {
    let contacts = &investigation.contacts;
    // Roles flatten back to semicolon-joined strings, the inverse of the
    // annotation split.
    let roles: Vec<(String, String, String)> = contacts
        .iter()
        .map(|c| join_annotations(&c.roles))
        .collect();
    vec![
        (
            "Investigation Person Last Name",
            contacts.iter().map(|c| c.last_name.clone()).collect(),
        ),
        (
            "Investigation Person First Name",
            contacts.iter().map(|c| c.first_name.clone()).collect(),
        ),
        (
            "Investigation Person Mid Initials",
            contacts.iter().map(|c| c.mid_initials.clone()).collect(),
        ),
        (
            "Investigation Person Email",
            contacts.iter().map(|c| c.email.clone()).collect(),
        ),
        (
            "Investigation Person Phone",
            contacts.iter().map(|c| c.phone.clone()).collect(),
        ),
        (
            "Investigation Person Fax",
            contacts.iter().map(|c| c.fax.clone()).collect(),
        ),
        (
            "Investigation Person Address",
            contacts.iter().map(|c| c.address.clone()).collect(),
        ),
        (
            "Investigation Person Affiliation",
            contacts.iter().map(|c| c.affiliation.clone()).collect(),
        ),
        (
            "Investigation Person Roles",
            roles.iter().map(|(names, _, _)| names.clone()).collect(),
        ),
        (
            "Investigation Person Roles Term Accession Number",
            roles.iter().map(|(_, _, accessions)| accessions.clone()).collect(),
        ),
        (
            "Investigation Person Roles Term Source REF",
            roles.iter().map(|(_, sources, _)| sources.clone()).collect(),
        ),
    ]
}
