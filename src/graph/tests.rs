use super::annotations::{annotation, annotation_list, join_annotations};
use super::nodes::NodeDictionaries;
use super::processes::{link_processes, AssayContext};
use super::*;
use crate::model::{MaterialRef, OntologyAnnotation, Protocol};
use crate::tree::{RawNode, RawProcessNode, Record};

fn record(pairs: &[(&str, &str)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn node(name: &str, node_type: &str) -> RawNode {
    RawNode {
        name: name.to_string(),
        node_type: node_type.to_string(),
        ..Default::default()
    }
}

fn process_node(name: &str, inputs: &[&str], outputs: &[&str]) -> RawProcessNode {
    RawProcessNode {
        name: name.to_string(),
        protocol: None,
        inputs: inputs.iter().map(|s| s.to_string()).collect(),
        outputs: outputs.iter().map(|s| s.to_string()).collect(),
    }
}

fn protocol(name: &str) -> Protocol {
    Protocol {
        name: name.to_string(),
        ..Default::default()
    }
}

// --- annotation assembly ---------------------------------------------------

#[test]
fn annotation_list_preserves_order_and_position() {
    let rec = record(&[
        ("Study Protocol Parameters Name", "temperature;duration"),
        ("Study Protocol Parameters Name Term Source REF", "UO;"),
        (
            "Study Protocol Parameters Name Term Accession Number",
            "UO:0000027;",
        ),
    ]);
    let annotations =
        annotation_list(&rec, Scope::Study, "Study Protocol Parameters Name").unwrap();
    assert_eq!(annotations.len(), 2);
    assert_eq!(annotations[0].name, "temperature");
    assert_eq!(annotations[0].term_source, "UO");
    assert_eq!(annotations[0].term_accession, "UO:0000027");
    assert_eq!(annotations[1].name, "duration");
    assert_eq!(annotations[1].term_source, "");
}

#[test]
fn annotation_arity_mismatch_is_an_error() {
    let rec = record(&[
        ("Study Protocol Parameters Name", "a;b;c"),
        ("Study Protocol Parameters Name Term Source REF", "x;y"),
        ("Study Protocol Parameters Name Term Accession Number", ";;"),
    ]);
    let err = annotation_list(&rec, Scope::Study, "Study Protocol Parameters Name").unwrap_err();
    assert_eq!(
        err,
        GraphError::InconsistentAnnotationArity {
            field: "Study Protocol Parameters Name".to_string(),
            names: 3,
            sources: 2,
            accessions: 3,
        }
    );
}

#[test]
fn missing_annotation_column_names_the_header() {
    let rec = record(&[("Study Design Type", "intervention design")]);
    let err = annotation(&rec, Scope::Study, "Study Design Type").unwrap_err();
    assert_eq!(
        err,
        GraphError::MissingField {
            scope: Scope::Study,
            field: "Study Design Type Term Source REF".to_string(),
        }
    );
}

#[test]
fn join_is_the_inverse_of_split() {
    let annotations = vec![
        OntologyAnnotation {
            name: "curator".to_string(),
            term_source: "OBI".to_string(),
            term_accession: "OBI:1".to_string(),
        },
        OntologyAnnotation {
            name: "investigator".to_string(),
            term_source: "OBI".to_string(),
            term_accession: "OBI:2".to_string(),
        },
    ];
    let (names, sources, accessions) = join_annotations(&annotations);
    let rec = record(&[
        ("Investigation Person Roles", names.as_str()),
        ("Investigation Person Roles Term Source REF", sources.as_str()),
        (
            "Investigation Person Roles Term Accession Number",
            accessions.as_str(),
        ),
    ]);
    let rebuilt =
        annotation_list(&rec, Scope::Investigation, "Investigation Person Roles").unwrap();
    assert_eq!(rebuilt, annotations);
}

mod annotation_roundtrip {
    use super::*;
    use proptest::prelude::*;

    // Tokens must be semicolon-free; the delimiter is not escapable in the
    // tabular encoding.
    fn token() -> impl Strategy<Value = String> {
        "[A-Za-z0-9 _:.-]{0,12}"
    }

    proptest! {
        /// Any ordered annotation list joined into the three semicolon
        /// strings comes back identical, in order, with no loss.
        #[test]
        fn split_reproduces_joined_lists(
            triples in prop::collection::vec((token(), token(), token()), 1..8)
        ) {
            let annotations: Vec<OntologyAnnotation> = triples
                .iter()
                .map(|(name, source, accession)| OntologyAnnotation {
                    name: name.clone(),
                    term_source: source.clone(),
                    term_accession: accession.clone(),
                })
                .collect();
            let (names, sources, accessions) = join_annotations(&annotations);
            let rec = record(&[
                ("Study Protocol Parameters Name", names.as_str()),
                ("Study Protocol Parameters Name Term Source REF", sources.as_str()),
                (
                    "Study Protocol Parameters Name Term Accession Number",
                    accessions.as_str(),
                ),
            ]);
            let rebuilt =
                annotation_list(&rec, Scope::Study, "Study Protocol Parameters Name").unwrap();
            prop_assert_eq!(rebuilt, annotations);
        }
    }
}

// --- entity builders -------------------------------------------------------

#[test]
fn publication_builder_honours_the_scope_prefix() {
    let rec = record(&[
        ("Study PubMed ID", "123456"),
        ("Study Publication DOI", "10.1000/demo"),
        ("Study Publication Author List", "Doe J, Roe R"),
        ("Study Publication Title", "A demo paper"),
        ("Study Publication Status", "published"),
        ("Study Publication Status Term Source REF", "OBI"),
        ("Study Publication Status Term Accession Number", "OBI:42"),
    ]);
    let pubs = builders::publications(std::slice::from_ref(&rec), Scope::Study).unwrap();
    assert_eq!(pubs.len(), 1);
    assert_eq!(pubs[0].pubmed_id, "123456");
    assert_eq!(pubs[0].title, "A demo paper");
    assert_eq!(pubs[0].status.name, "published");
    assert_eq!(pubs[0].status.term_source, "OBI");
}

#[test]
fn publication_builder_rejects_investigation_headers_at_study_scope() {
    let rec = record(&[("Investigation PubMed ID", "123456")]);
    let err = builders::publications(std::slice::from_ref(&rec), Scope::Study).unwrap_err();
    assert_eq!(
        err,
        GraphError::MissingField {
            scope: Scope::Study,
            field: "Study PubMed ID".to_string(),
        }
    );
}

#[test]
fn contact_builder_leaves_roles_empty() {
    let rec = record(&[
        ("Investigation Person Last Name", "Doe"),
        ("Investigation Person First Name", "Jane"),
        ("Investigation Person Mid Initials", "Q"),
        ("Investigation Person Email", "jane@example.org"),
        ("Investigation Person Phone", ""),
        ("Investigation Person Fax", ""),
        ("Investigation Person Address", "1 Example Rd"),
        ("Investigation Person Affiliation", "Example University"),
    ]);
    let contacts =
        builders::contacts(std::slice::from_ref(&rec), Scope::Investigation).unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].last_name, "Doe");
    assert!(contacts[0].roles.is_empty());
}

#[test]
fn protocol_builder_captures_full_parameter_triples() {
    let rec = record(&[
        ("Study Protocol Name", "extraction"),
        ("Study Protocol Type", "material separation"),
        ("Study Protocol Type Term Source REF", "OBI"),
        ("Study Protocol Type Term Accession Number", "OBI:0302884"),
        ("Study Protocol Description", ""),
        ("Study Protocol URI", ""),
        ("Study Protocol Version", "1"),
        ("Study Protocol Parameters Name", "temperature;duration"),
        ("Study Protocol Parameters Name Term Source REF", "UO;UO"),
        (
            "Study Protocol Parameters Name Term Accession Number",
            "UO:1;UO:2",
        ),
    ]);
    let protocols = builders::protocols(std::slice::from_ref(&rec)).unwrap();
    assert_eq!(protocols.len(), 1);
    assert_eq!(protocols[0].name, "extraction");
    assert_eq!(protocols[0].protocol_type.term_accession, "OBI:0302884");
    assert_eq!(protocols[0].parameters.len(), 2);
    assert_eq!(protocols[0].parameters[1].name.name, "duration");
    assert_eq!(protocols[0].parameters[1].name.term_accession, "UO:2");
}

#[test]
fn ontology_source_reference_builder_requires_every_column() {
    let complete = record(&[
        ("Term Source Name", "OBI"),
        ("Term Source File", "obi.owl"),
        ("Term Source Version", "25"),
        ("Term Source Description", "Ontology for Biomedical Investigations"),
    ]);
    let refs = builders::ontology_source_references(std::slice::from_ref(&complete)).unwrap();
    assert_eq!(refs[0].name, "OBI");

    let incomplete = record(&[("Term Source Name", "OBI")]);
    let err =
        builders::ontology_source_references(std::slice::from_ref(&incomplete)).unwrap_err();
    assert!(matches!(err, GraphError::MissingField { field, .. } if field == "Term Source File"));
}

// --- node dictionaries -----------------------------------------------------

#[test]
fn classification_partitions_by_type_tag() {
    let nodes = vec![
        node("source1", "Source Name"),
        node("sample1", "Sample Name"),
        node("run1.mzML", "Raw Spectral Data File"),
        node("fid1", "Free Induction Decay Data File"),
        node("extract1", "Extract Name"),
    ];
    let dicts = NodeDictionaries::classify(&nodes);

    assert_eq!(dicts.sources.len(), 1);
    assert_eq!(dicts.samples.len(), 1);
    assert_eq!(dicts.data_files.len(), 2);
    assert_eq!(dicts.data_files[1].data_type, "Free Induction Decay Data File");

    // The unrecognized extract node lands nowhere.
    assert!(dicts.source_ref("extract1").is_none());
    assert!(dicts.sample_ref("extract1").is_none());
    assert!(dicts.data_ref("extract1").is_none());

    // Pairwise disjoint by tag.
    assert!(dicts.sample_ref("source1").is_none());
    assert!(dicts.data_ref("sample1").is_none());
}

#[test]
fn characteristics_capture_paired_term_columns() {
    let mut raw = node("source1", "Source Name");
    raw.metadata = record(&[
        ("Characteristics[organism]", "Homo sapiens"),
        ("Characteristics[organism] Term Source REF", "NCBITAXON"),
        ("Characteristics[organism] Term Accession Number", "9606"),
        ("Characteristics[organism part]", "liver"),
        ("Source Name", "source1"),
    ]);
    let dicts = NodeDictionaries::classify(std::slice::from_ref(&raw));
    let characteristics = &dicts.sources[0].characteristics;

    assert_eq!(characteristics.len(), 2);
    assert_eq!(characteristics[0].category.name, "organism");
    assert_eq!(characteristics[0].category.term_source, "NCBITAXON");
    assert_eq!(characteristics[0].category.term_accession, "9606");
    assert_eq!(characteristics[1].category.name, "organism part");
    assert_eq!(characteristics[1].category.term_source, "");
}

#[test]
fn redeclared_node_name_replaces_in_place() {
    let mut replacement = node("sample1", "Sample Name");
    replacement.metadata = record(&[("Characteristics[organism]", "Homo sapiens")]);
    let nodes = vec![
        node("sample1", "Sample Name"),
        node("sample2", "Sample Name"),
        replacement,
    ];
    let dicts = NodeDictionaries::classify(&nodes);

    assert_eq!(dicts.samples.len(), 2);
    assert_eq!(dicts.sample_ref("sample1"), Some(0));
    assert_eq!(dicts.samples[0].characteristics.len(), 1);
}

// --- process linking -------------------------------------------------------

#[test]
fn linking_preserves_declaration_order_and_is_deterministic() {
    let nodes = vec![
        node("source1", "Source Name"),
        node("sample1", "Sample Name"),
        node("sample2", "Sample Name"),
    ];
    let dicts = NodeDictionaries::classify(&nodes);
    let process_nodes = vec![
        process_node("p1", &["source1"], &["sample1"]),
        process_node("p2", &["sample1"], &["sample2"]),
    ];

    let first = link_processes(&process_nodes, &dicts, &[], None).unwrap();
    let second = link_processes(&process_nodes, &dicts, &[], None).unwrap();
    assert_eq!(first, second);

    assert_eq!(first[0].inputs, vec![MaterialRef::Source(0)]);
    assert_eq!(first[0].outputs, vec![0]);
    // sample1 is p1's output and p2's input, by the same index.
    assert_eq!(first[1].inputs, vec![MaterialRef::Sample(0)]);
    assert_eq!(first[1].outputs, vec![1]);
}

#[test]
fn ambiguous_input_name_fans_out_to_both_dictionaries() {
    let nodes = vec![node("culture", "Source Name"), node("culture", "Sample Name")];
    let dicts = NodeDictionaries::classify(&nodes);
    let linked = link_processes(
        &[process_node("p1", &["culture"], &[])],
        &dicts,
        &[],
        None,
    )
    .unwrap();

    assert_eq!(
        linked[0].inputs,
        vec![MaterialRef::Source(0), MaterialRef::Sample(0)]
    );
}

#[test]
fn outputs_resolve_through_the_sample_dictionary_only() {
    let nodes = vec![
        node("source1", "Source Name"),
        node("sample1", "Sample Name"),
        node("run1.mzML", "Raw Spectral Data File"),
    ];
    let dicts = NodeDictionaries::classify(&nodes);
    let linked = link_processes(
        &[process_node("p1", &["source1"], &["sample1", "source1", "run1.mzML"])],
        &dicts,
        &[],
        None,
    )
    .unwrap();

    assert_eq!(linked[0].outputs, vec![0]);
}

#[test]
fn declared_protocol_resolves_to_its_study_index() {
    let dicts = NodeDictionaries::classify(&[]);
    let protocols = vec![protocol("extraction"), protocol("NMR spectroscopy")];
    let mut raw = process_node("p1", &[], &[]);
    raw.protocol = Some("NMR spectroscopy".to_string());

    let linked = link_processes(std::slice::from_ref(&raw), &dicts, &protocols, None).unwrap();
    assert_eq!(linked[0].executes_protocol, Some(1));

    let undeclared = process_node("p2", &[], &[]);
    let linked = link_processes(std::slice::from_ref(&undeclared), &dicts, &protocols, None)
        .unwrap();
    assert_eq!(linked[0].executes_protocol, None);
}

#[test]
fn unresolvable_protocol_name_aborts_the_link() {
    let dicts = NodeDictionaries::classify(&[]);
    let mut raw = process_node("p1", &[], &[]);
    raw.protocol = Some("centrifugation".to_string());

    let err = link_processes(std::slice::from_ref(&raw), &dicts, &[], None).unwrap_err();
    assert_eq!(
        err,
        GraphError::UnknownProtocol {
            process: "p1".to_string(),
            protocol: "centrifugation".to_string(),
        }
    );
}

// --- graph assembly --------------------------------------------------------

use crate::tree::{RawStudy, RawTree};

fn investigation_metadata() -> Record {
    record(&[
        ("Investigation Identifier", "INV1"),
        ("Investigation Title", "An investigation"),
        ("Investigation Description", ""),
        ("Investigation Submission Date", "2017-01-01"),
        ("Investigation Public Release Date", "2017-06-01"),
    ])
}

fn study_metadata(identifier: &str) -> Record {
    record(&[
        ("Study Identifier", identifier),
        ("Study Title", "A study"),
        ("Study Description", ""),
        ("Study Submission Date", "2017-01-01"),
        ("Study Public Release Date", "2017-06-01"),
    ])
}

#[test]
fn worked_example_assembles_the_expected_graph() {
    let tree = RawTree {
        metadata: investigation_metadata(),
        ontology_refs: vec![record(&[
            ("Term Source Name", "OBI"),
            ("Term Source File", "obi.owl"),
            ("Term Source Version", "25"),
            ("Term Source Description", ""),
        ])],
        studies: vec![RawStudy {
            metadata: study_metadata("S1"),
            nodes: vec![node("source1", "Source Name"), node("sample1", "Sample Name")],
            process_nodes: vec![process_node("p1", &["source1"], &["sample1"])],
            ..Default::default()
        }],
        ..Default::default()
    };

    let investigation = assemble(&tree).unwrap().expect("an investigation");
    assert_eq!(investigation.identifier, "INV1");
    assert_eq!(investigation.ontology_source_references[0].name, "OBI");
    assert!(investigation.ontology_source("OBI").is_some());
    assert!(investigation.ontology_source("CHEBI").is_none());

    let study = &investigation.studies[0];
    assert_eq!(study.identifier, "S1");
    assert_eq!(study.sources.len(), 1);
    assert_eq!(study.sources[0].name, "source1");
    assert_eq!(study.samples.len(), 1);
    assert_eq!(study.samples[0].name, "sample1");

    let process = &study.process_sequence[0];
    assert_eq!(process.inputs, vec![MaterialRef::Source(0)]);
    assert_eq!(process.outputs, vec![0]);
    assert_eq!(
        study.resolve_input(process.inputs[0]).map(|m| m.name().to_string()),
        Some("source1".to_string())
    );
    assert_eq!(
        study.resolve_output(process.outputs[0]).map(|s| s.name.as_str()),
        Some("sample1")
    );
}

#[test]
fn empty_metadata_yields_no_investigation() {
    let tree = RawTree {
        studies: vec![RawStudy {
            metadata: study_metadata("S1"),
            ..Default::default()
        }],
        ..Default::default()
    };
    assert_eq!(assemble(&tree).unwrap(), None);
}

#[test]
fn any_failing_study_aborts_the_whole_conversion() {
    let mut broken = study_metadata("S2");
    broken.remove("Study Title");

    let tree = RawTree {
        metadata: investigation_metadata(),
        studies: vec![
            RawStudy {
                metadata: study_metadata("S1"),
                ..Default::default()
            },
            RawStudy {
                metadata: broken,
                ..Default::default()
            },
        ],
        ..Default::default()
    };

    let err = assemble(&tree).unwrap_err();
    assert_eq!(
        err,
        GraphError::MissingField {
            scope: Scope::Study,
            field: "Study Title".to_string(),
        }
    );
}

#[test]
fn assay_metadata_is_built_strictly() {
    let assay = crate::tree::RawAssay {
        metadata: record(&[
            ("Study Assay File Name", "a_assay.txt"),
            ("Study Assay Measurement Type", "metabolite profiling"),
            // Term Source REF / Term Accession Number missing
        ]),
        ..Default::default()
    };
    let tree = RawTree {
        metadata: investigation_metadata(),
        studies: vec![RawStudy {
            metadata: study_metadata("S1"),
            assays: vec![assay],
            ..Default::default()
        }],
        ..Default::default()
    };

    let err = assemble(&tree).unwrap_err();
    assert_eq!(
        err,
        GraphError::MissingField {
            scope: Scope::Assay,
            field: "Study Assay Measurement Type Term Source REF".to_string(),
        }
    );
}

#[test]
fn assays_get_their_own_dictionaries() {
    let assay = crate::tree::RawAssay {
        metadata: record(&[
            ("Study Assay File Name", "a_assay.txt"),
            ("Study Assay Measurement Type", "metabolite profiling"),
            ("Study Assay Measurement Type Term Source REF", "OBI"),
            ("Study Assay Measurement Type Term Accession Number", "OBI:1"),
            ("Study Assay Technology Type", "mass spectrometry"),
            ("Study Assay Technology Type Term Source REF", "OBI"),
            ("Study Assay Technology Type Term Accession Number", "OBI:2"),
            ("Study Assay Technology Platform", "LC-MS"),
        ]),
        nodes: vec![
            node("sample1", "Sample Name"),
            node("run1.mzML", "Raw Spectral Data File"),
        ],
        process_nodes: vec![process_node("ap1", &["sample1"], &["sample1"])],
    };
    let tree = RawTree {
        metadata: investigation_metadata(),
        studies: vec![RawStudy {
            metadata: study_metadata("S1"),
            nodes: vec![node("sample1", "Sample Name")],
            assays: vec![assay],
            ..Default::default()
        }],
        ..Default::default()
    };

    let investigation = assemble(&tree).unwrap().expect("an investigation");
    let study = &investigation.studies[0];
    let assay = &study.assays[0];

    assert_eq!(assay.file_name, "a_assay.txt");
    assert_eq!(assay.measurement_type.name, "metabolite profiling");
    assert_eq!(assay.technology_platform, "LC-MS");
    assert_eq!(assay.samples.len(), 1);
    assert_eq!(assay.data_files.len(), 1);

    // The assay's sample is its own instance, distinct from the study's.
    assert_eq!(study.samples.len(), 1);
    let assay_process = &assay.process_sequence[0];
    assert_eq!(assay_process.inputs, vec![MaterialRef::Sample(0)]);
    assert_eq!(
        assay.resolve_input(assay_process.inputs[0]).map(|m| m.name().to_string()),
        Some("sample1".to_string())
    );
}

#[test]
fn assay_context_degrades_missing_fields_to_empty_strings() {
    let partial = record(&[("Study Assay Measurement Type", "metabolite profiling")]);
    let context = AssayContext::from_metadata(Some(&partial));
    assert_eq!(context.measurement_type, "metabolite profiling");
    assert_eq!(context.technology_platform, "");
    assert_eq!(context.technology_type, "");

    assert_eq!(AssayContext::from_metadata(None), AssayContext::default());
}
