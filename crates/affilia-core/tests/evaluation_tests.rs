//! Evaluation engine scoring against a gold standard

use affilia_core::evaluation::{EvaluationEngine, GoldStandardStore};
use affilia_core::{
    AgentMetrics, AuthorRecord, EngineeringMetrics, GoldAuthor, GoldPaper, OrgType, PaperRecord,
    ResolverConfig,
};

fn gold_author(name: &str, raw: &str, normalized: &str, country: &str, code: &str) -> GoldAuthor {
    GoldAuthor {
        name: name.to_string(),
        raw_affiliation: raw.to_string(),
        normalized_affiliation: normalized.to_string(),
        country: country.to_string(),
        country_code: code.to_string(),
        org_type: OrgType::University,
    }
}

fn pred_author(name: &str, raw: &str, normalized: &str, country: &str, code: &str) -> AuthorRecord {
    AuthorRecord {
        name: name.to_string(),
        raw_affiliation: raw.to_string(),
        normalized_affiliation: Some(normalized.to_string()),
        country: Some(country.to_string()),
        country_code: Some(code.to_string()),
        org_type: OrgType::University,
        confidence: 1.0,
    }
}

fn engine_with_gold(papers: Vec<GoldPaper>) -> EvaluationEngine {
    let dir = tempfile::tempdir().unwrap();
    let mut store = GoldStandardStore::open(dir.path().join("gold.json")).unwrap();
    for paper in papers {
        store.add_paper(paper);
    }
    EvaluationEngine::new(store, ResolverConfig::default())
}

fn two_author_gold() -> GoldPaper {
    GoldPaper {
        paper_id: "2401.00001".to_string(),
        title: "A Study".to_string(),
        authors: vec![
            gold_author(
                "Alice Chen",
                "MIT CSAIL, Cambridge, MA",
                "Massachusetts Institute of Technology",
                "United States",
                "US",
            ),
            gold_author(
                "Bob Martinez",
                "University of Toronto",
                "University of Toronto",
                "Canada",
                "CA",
            ),
        ],
        source: "manual".to_string(),
        annotator: String::new(),
        annotation_date: String::new(),
        notes: String::new(),
    }
}

#[test]
fn test_one_match_one_hallucination() {
    let engine = engine_with_gold(vec![two_author_gold()]);

    let mut paper = PaperRecord::new("2401.00001", "A Study");
    paper.authors.push(pred_author(
        "Alice Chen",
        "MIT CSAIL, Cambridge, MA",
        "Massachusetts Institute of Technology",
        "United States",
        "US",
    ));
    paper.authors.push(AuthorRecord::new("Zed Quux"));

    let metrics = engine.evaluate_extraction(&[paper]);

    assert_eq!(metrics.matched_authors, 1);
    assert!((metrics.author_precision - 0.5).abs() < 1e-12);
    assert!((metrics.author_recall - 0.5).abs() < 1e-12);
    assert!((metrics.author_f1 - 0.5).abs() < 1e-12);
    assert!((metrics.author_hallucination_rate - 0.5).abs() < 1e-12);
}

#[test]
fn test_perfect_predictions_score_one() {
    let engine = engine_with_gold(vec![two_author_gold()]);

    let mut paper = PaperRecord::new("2401.00001", "A Study");
    paper.authors.push(pred_author(
        "Alice Chen",
        "MIT CSAIL, Cambridge, MA",
        "Massachusetts Institute of Technology",
        "United States",
        "US",
    ));
    paper.authors.push(pred_author(
        "Bob Martinez",
        "University of Toronto",
        "University of Toronto",
        "Canada",
        "CA",
    ));

    let metrics = engine.evaluate_extraction(&[paper]);

    assert!((metrics.author_f1 - 1.0).abs() < 1e-12);
    assert!((metrics.affiliation_f1 - 1.0).abs() < 1e-12);
    assert!((metrics.normalization_accuracy - 1.0).abs() < 1e-12);
    assert!((metrics.country_accuracy - 1.0).abs() < 1e-12);
    assert!((metrics.org_type_accuracy - 1.0).abs() < 1e-12);
    assert!((metrics.hierarchical_accuracy - 1.0).abs() < 1e-12);
    assert_eq!(metrics.author_hallucination_rate, 0.0);
    assert_eq!(metrics.affiliation_hallucination_rate, 0.0);
}

#[test]
fn test_author_names_match_across_word_order() {
    let engine = engine_with_gold(vec![two_author_gold()]);

    let mut paper = PaperRecord::new("2401.00001", "A Study");
    paper.authors.push(pred_author(
        "Chen, Alice",
        "MIT CSAIL, Cambridge, MA",
        "Massachusetts Institute of Technology",
        "United States",
        "US",
    ));

    let metrics = engine.evaluate_extraction(&[paper]);
    assert_eq!(metrics.matched_authors, 1);
}

#[test]
fn test_hierarchical_stricter_than_components() {
    let engine = engine_with_gold(vec![two_author_gold()]);

    // Right organization, wrong country.
    let mut paper = PaperRecord::new("2401.00001", "A Study");
    paper.authors.push(pred_author(
        "Alice Chen",
        "MIT CSAIL, Cambridge, MA",
        "Massachusetts Institute of Technology",
        "Germany",
        "DE",
    ));

    let metrics = engine.evaluate_extraction(&[paper]);
    assert!((metrics.normalization_accuracy - 1.0).abs() < 1e-12);
    assert_eq!(metrics.country_accuracy, 0.0);
    assert_eq!(metrics.hierarchical_accuracy, 0.0);
    assert!(metrics.hierarchical_accuracy <= metrics.normalization_accuracy);
}

#[test]
fn test_fabricated_affiliation_counts_against_precision() {
    let mut gold = two_author_gold();
    gold.authors[0].raw_affiliation = String::new();
    gold.authors[0].normalized_affiliation = String::new();
    let engine = engine_with_gold(vec![gold]);

    let mut paper = PaperRecord::new("2401.00001", "A Study");
    // Gold says this author listed no affiliation.
    paper.authors.push(pred_author(
        "Alice Chen",
        "Evil Corp Headquarters",
        "Evil Corp",
        "United States",
        "US",
    ));

    let metrics = engine.evaluate_extraction(&[paper]);
    assert_eq!(metrics.affiliation_precision, 0.0);
    assert!((metrics.affiliation_hallucination_rate - 1.0).abs() < 1e-12);
}

#[test]
fn test_unannotated_gold_type_never_counts_as_correct() {
    let mut gold = two_author_gold();
    gold.authors[0].org_type = OrgType::Unknown;
    let engine = engine_with_gold(vec![gold]);

    let mut paper = PaperRecord::new("2401.00001", "A Study");
    let mut author = pred_author(
        "Alice Chen",
        "MIT CSAIL, Cambridge, MA",
        "Massachusetts Institute of Technology",
        "United States",
        "US",
    );
    // Agreeing on unknown is not a correct type prediction; the gold
    // annotation simply does not specify one.
    author.org_type = OrgType::Unknown;
    paper.authors.push(author);

    let metrics = engine.evaluate_extraction(&[paper]);
    assert_eq!(metrics.matched_authors, 1);
    assert_eq!(metrics.org_type_accuracy, 0.0);
    assert!((metrics.normalization_accuracy - 1.0).abs() < 1e-12);
}

#[test]
fn test_empty_predictions_yield_zero_metrics() {
    let engine = engine_with_gold(vec![two_author_gold()]);
    let metrics = engine.evaluate_extraction(&[]);

    assert_eq!(metrics.author_precision, 0.0);
    assert_eq!(metrics.author_recall, 0.0);
    assert_eq!(metrics.author_f1, 0.0);
    assert_eq!(metrics.affiliation_f1, 0.0);
    assert_eq!(metrics.papers_evaluated, 0);
}

#[test]
fn test_unannotated_paper_is_skipped() {
    let engine = engine_with_gold(vec![two_author_gold()]);

    let mut known = PaperRecord::new("2401.00001", "A Study");
    known.authors.push(pred_author(
        "Alice Chen",
        "MIT CSAIL, Cambridge, MA",
        "Massachusetts Institute of Technology",
        "United States",
        "US",
    ));
    let unknown = PaperRecord::new("2401.99999", "Never Annotated");

    let metrics = engine.evaluate_extraction(&[known, unknown]);
    assert_eq!(metrics.papers_evaluated, 1);
    assert_eq!(metrics.papers_skipped, 1);
}

#[test]
fn test_full_report_blends_all_dimensions() {
    let engine = engine_with_gold(vec![two_author_gold()]);

    let mut paper = PaperRecord::new("2401.00001", "A Study");
    paper.authors.push(pred_author(
        "Alice Chen",
        "MIT CSAIL, Cambridge, MA",
        "Massachusetts Institute of Technology",
        "United States",
        "US",
    ));
    paper.authors.push(pred_author(
        "Bob Martinez",
        "University of Toronto",
        "University of Toronto",
        "Canada",
        "CA",
    ));

    let agent = AgentMetrics {
        e2e_success_rate: 1.0,
        papers_fully_processed: 1,
        papers_partial: 0,
        papers_failed: 0,
    };
    let engineering = EngineeringMetrics {
        total_time_seconds: 30.0,
        avg_time_per_paper: 30.0,
    };

    let report = engine.evaluate_full(&[paper], Some(agent), Some(engineering));
    assert!((report.overall_quality_score - 1.0).abs() < 1e-12);
    assert!(!report.timestamp.is_empty());
}

#[test]
fn test_full_report_without_optional_dimensions() {
    let engine = engine_with_gold(vec![two_author_gold()]);
    let report = engine.evaluate_full(&[], None, None);

    assert!(report.agent.is_none());
    assert!(report.engineering.is_none());
    assert_eq!(report.overall_quality_score, 0.0);
}
