//! End-to-end integration tests for the parser pipeline.
//!
//! Runs complete registry records through `DocumentParser` and the batch
//! driver using fixture data modelled on InfoLEG exports.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use normas_parser::{
    run_batch, BatchOptions, BatchSummary, DocumentParser, ParsedDocument, ParserConfig,
    RawDocumentRecord,
};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn parse_fixture(name: &str) -> ParsedDocument {
    let parser = DocumentParser::new(ParserConfig::default()).expect("default profile is valid");
    let value: Value = serde_json::from_str(&load_fixture(name)).expect("fixture is valid JSON");
    let record = RawDocumentRecord::from_value(value).expect("fixture is a valid record");
    parser.parse(&record)
}

fn assert_increasing(ordinals: &[u32]) {
    assert!(
        ordinals.windows(2).all(|w| w[0] < w[1]),
        "ordinals not increasing: {ordinals:?}"
    );
}

#[test]
fn test_decree_nesting_fidelity() {
    let doc = parse_fixture("decreto_titulos.json");

    assert_eq!(doc.cuerpo.len(), 3);

    let with_chapters: Vec<_> = doc.cuerpo.iter().filter(|t| !t.capitulos.is_empty()).collect();
    assert_eq!(with_chapters.len(), 2);

    let titles: Vec<_> = doc.cuerpo.iter().map(|t| t.titulo.as_deref()).collect();
    assert_eq!(titles, vec![Some("I"), Some("II"), Some("III")]);

    let first = &doc.cuerpo[0];
    assert_eq!(first.nombre.as_deref(), Some("DISPOSICIONES GENERALES"));
    let counts: Vec<usize> = first.capitulos.iter().map(|c| c.articulos.len()).collect();
    assert_eq!(counts, vec![2, 1]);
    assert_eq!(first.capitulos[1].titulo.as_deref(), Some("DEFINICIONES"));

    let second = &doc.cuerpo[1];
    assert!(second.capitulos.is_empty());
    assert_eq!(second.articulos.len(), 2);

    let third = &doc.cuerpo[2];
    assert_eq!(third.capitulos.len(), 1);
    assert_eq!(third.capitulos[0].capitulo.as_deref(), Some("ÚNICO"));
    assert_eq!(third.capitulos[0].titulo, None);
    assert_eq!(third.capitulos[0].articulos.len(), 2);

    assert_eq!(doc.article_count(), 7);
}

#[test]
fn test_decree_quoted_article_stays_in_text() {
    let doc = parse_fixture("decreto_titulos.json");
    let articles = &doc.cuerpo[1].articulos;

    assert_eq!(articles[0].art, 4);
    assert!(articles[0].texto.ends_with("“ARTÍCULO 5°.- El trámite será digital.”"));
    assert_eq!(articles[1].art, 5);
}

#[test]
fn test_decree_preamble_and_tail() {
    let doc = parse_fixture("decreto_titulos.json");

    assert_eq!(
        doc.preambulo.contexto.as_deref(),
        Some("Ciudad de Buenos Aires, 10/07/2024")
    );
    assert_eq!(
        doc.preambulo.visto.as_deref(),
        Some("el Expediente N° EX-2024-55555555-APN-DGDYD#MJ, la Ley N° 27.742, y")
    );
    assert!(doc
        .preambulo
        .considerando
        .as_deref()
        .is_some_and(|c| c.starts_with("Que resulta necesario")));

    assert_eq!(
        doc.firmas,
        vec!["MILEI", "Guillermo Francos", "Mariano Cúneo Libarona"]
    );
    assert!(doc
        .nota
        .as_deref()
        .is_some_and(|n| n.starts_with("El/los Anexo/s")));

    let last = doc.cuerpo[2].capitulos[0].articulos.last().unwrap();
    assert_eq!(
        last.texto,
        "Comuníquese, publíquese, dese a la DIRECCIÓN NACIONAL DEL REGISTRO OFICIAL y archívese."
    );
}

#[test]
fn test_decree_footnote_annexes_and_meta() {
    let doc = parse_fixture("decreto_titulos.json");
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(
        value["pie"],
        json!({"edicion": "11/07/2024", "numero": "45678/24", "validez": "11/07/2024"})
    );
    assert!(doc
        .resto
        .as_deref()
        .is_some_and(|r| r.starts_with("Fecha de publicación 11/07/2024")));

    assert_eq!(
        value["anexos"],
        json!([{"nombre": "Anexo 1", "url": "https://www.boletinoficial.gob.ar/anexos/ANEXO_1.pdf"}])
    );

    assert_eq!(doc.meta.len(), 11);
    assert_eq!(doc.meta["id"], json!(401234));
    assert!(!doc.meta.contains_key("textoNorma"));
    assert!(!doc.meta.contains_key("copyright"));
}

#[test]
fn test_law_with_chapters_signatures_and_note() {
    let doc = parse_fixture("ley_capitulos.json");

    assert!(doc.preambulo.is_empty());
    assert_eq!(doc.cuerpo.len(), 1);

    let title = &doc.cuerpo[0];
    assert_eq!(title.titulo, None);
    assert!(title.articulos.is_empty());
    assert_eq!(title.capitulos.len(), 2);
    assert_eq!(title.capitulos[0].titulo.as_deref(), Some("Objeto y ámbito"));
    assert_eq!(title.capitulos[1].titulo.as_deref(), Some("Disposiciones finales"));

    let last_chapter: Vec<u32> = title.capitulos[1].articulos.iter().map(|a| a.art).collect();
    assert_eq!(last_chapter, vec![3, 4]);
    assert!(title.capitulos[1].articulos[0]
        .texto
        .contains("según el artículo 2°.- de la Ley 20.000"));

    let last = &title.capitulos[1].articulos[1];
    assert!(last.texto.starts_with("Comuníquese al Poder Ejecutivo nacional."));
    assert!(!last.texto.contains("VILLARRUEL"));
    assert!(!last.texto.contains("NOTA:"));

    assert_eq!(
        doc.firmas,
        vec![
            "VICTORIA VILLARRUEL",
            "MARTÍN A. MENEM",
            "Agustín Douglas Neil",
            "Tomás Ignacio Figueroa",
        ]
    );
    assert_eq!(doc.nota.as_deref(), Some("Los Anexos no se publican."));
    assert_eq!(doc.pie.as_ref().map(|p| p.edicion.as_str()), Some("08/07/2024"));
    assert_eq!(doc.resto, None);
}

#[test]
fn test_ordinals_increase_in_every_list() {
    for name in ["decreto_titulos.json", "ley_capitulos.json"] {
        let doc = parse_fixture(name);
        for title in &doc.cuerpo {
            let direct: Vec<u32> = title.articulos.iter().map(|a| a.art).collect();
            assert_increasing(&direct);
            for chapter in &title.capitulos {
                let ordinals: Vec<u32> = chapter.articulos.iter().map(|a| a.art).collect();
                assert_increasing(&ordinals);
            }
        }
    }
}

#[test]
fn test_output_is_deterministic() {
    let first = serde_json::to_string(&parse_fixture("decreto_titulos.json")).unwrap();
    let second = serde_json::to_string(&parse_fixture("decreto_titulos.json")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_batch_fixture_isolation() {
    let parser = DocumentParser::new(ParserConfig::default()).unwrap();
    let input = load_fixture("lote.jsonl");

    let mut output = Vec::new();
    let summary = run_batch(
        &parser,
        input.as_bytes(),
        &mut output,
        &BatchOptions { jobs: 2 },
        |_| {},
    )
    .unwrap();
    assert_eq!(summary, BatchSummary { records: 5, errors: 2 });

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 5);

    assert_eq!(lines[0]["meta"]["id"], json!(1));
    assert_eq!(lines[1]["id"], json!(2));
    assert!(lines[1]["error"].is_string());
    assert_eq!(lines[2]["id"], Value::Null);
    assert!(lines[2]["error"].is_string());
    assert_eq!(lines[3]["meta"]["tipoNorma"], json!("Resolución"));
    assert_eq!(lines[3]["cuerpo"], json!([]));
    assert_eq!(lines[4]["firmas"], json!(["MILEI", "Luis Caputo"]));
}

#[test]
fn test_profile_from_yaml_changes_annex_label() {
    let mut profile = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut profile, b"annex_label: Adjunto\n").unwrap();

    let config = ParserConfig::load(Some(profile.path())).unwrap();
    let parser = DocumentParser::new(config).unwrap();
    let value: Value = serde_json::from_str(&load_fixture("decreto_titulos.json")).unwrap();
    let doc = parser.parse(&RawDocumentRecord::from_value(value).unwrap());

    assert_eq!(doc.anexos[0].nombre, "Adjunto 1");
}
