use std::cell::RefCell;
use std::path::{Path, PathBuf};

use jlpt_trend::input::EntryLog;
use jlpt_trend::render::{PngRenderer, TrendRenderer};
use jlpt_trend::tokenizer::LongestMatchTokenizer;
use jlpt_trend::{
    compute_sentence_score, generate_difficulty_trend, Entry, RenderError, TrendArtifactNamer,
    TrendContext, UserTrend, UserTrendAggregator, VocabularyIndex,
};

/// Keeps every trend handed to it instead of drawing
#[derive(Default)]
struct CapturingRenderer {
    trends: RefCell<Vec<UserTrend>>,
}

impl TrendRenderer for CapturingRenderer {
    fn render(&self, trend: &UserTrend, _target: &Path) -> Result<(), RenderError> {
        self.trends.borrow_mut().push(trend.clone());
        Ok(())
    }
}

#[test]
fn sentence_scores_from_builtin_table() {
    let vocab = VocabularyIndex::builtin();
    let tokenizer = LongestMatchTokenizer::new(vocab);

    assert_eq!(compute_sentence_score("先生と子供", &tokenizer, vocab), Some(5.0 / 3.0));
    assert_eq!(compute_sentence_score("責任", &tokenizer, vocab), Some(3.0));
    assert_eq!(compute_sentence_score("ハンバーガー", &tokenizer, vocab), None);
    assert_eq!(compute_sentence_score("", &tokenizer, vocab), None);
}

#[test]
fn two_entry_log_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let vocab = VocabularyIndex::builtin();
    let tokenizer = LongestMatchTokenizer::new(vocab);
    let renderer = CapturingRenderer::default();
    let ctx = TrendContext {
        vocabulary: vocab,
        tokenizer: &tokenizer,
        renderer: &renderer,
        namer: TrendArtifactNamer::new(dir.path()),
        write_summary: false,
    };
    let entries = vec![
        Entry::new(1.0, "私は学生です"),
        Entry::new(2.0, "先生は忙しい"),
    ];

    let path = generate_difficulty_trend("7", &entries, &ctx).unwrap();

    assert_eq!(path, dir.path().join("jlpt_trend_7.png"));
    let trends = renderer.trends.borrow();
    let trend = &trends[0];
    // 私/は/で are N5; 先生 is N4 and は N5
    assert_eq!(trend.plottable(), vec![(1.0, 1.0), (2.0, 1.5)]);
    assert_eq!(trend.overall_average, Some(1.25));
}

#[test]
fn csv_log_with_unscored_and_unindexed_rows() {
    let csv = "user_id,sequence_index,text\n\
               alice,3,縁談\n\
               alice,?,私\n\
               alice,1,ハンバーガー\n\
               alice,2,先生\n\
               bob,1,子供\n";
    let log = EntryLog::from_reader(csv.as_bytes()).unwrap();
    let vocab = VocabularyIndex::builtin();
    let tokenizer = LongestMatchTokenizer::new(vocab);
    let aggregator = UserTrendAggregator::new(vocab, &tokenizer);

    let trend = aggregator.build("alice", &log.entries_for("alice"));

    assert_eq!(trend.total_entries, 4);
    assert_eq!(trend.scores(), vec![2.0, 4.0, 1.0]);
    assert_eq!(trend.plottable(), vec![(2.0, 2.0), (3.0, 4.0)]);
    assert_eq!(trend.overall_average, Some(7.0 / 3.0));
}

#[test]
fn every_user_gets_a_png() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "user_id,sequence_index,text\nalice,1,先生\nbob,1,ハンバーガー\nalice,2,責任\n";
    let log = EntryLog::from_reader(csv.as_bytes()).unwrap();
    let vocab = VocabularyIndex::builtin();
    let tokenizer = LongestMatchTokenizer::new(vocab);
    let renderer = PngRenderer::new(400, 240);
    let ctx = TrendContext {
        vocabulary: vocab,
        tokenizer: &tokenizer,
        renderer: &renderer,
        namer: TrendArtifactNamer::new(dir.path().join("static").join("jlpt_difficulty")),
        write_summary: false,
    };

    let paths: Vec<PathBuf> = log
        .by_user()
        .unwrap()
        .iter()
        .map(|(user, entries)| generate_difficulty_trend(user, entries, &ctx).unwrap())
        .collect();

    assert_eq!(paths.len(), 2);
    assert!(paths[0].ends_with("jlpt_trend_alice.png"));
    assert!(paths[1].ends_with("jlpt_trend_bob.png"));
    assert!(paths.iter().all(|p| p.is_file()));
}
