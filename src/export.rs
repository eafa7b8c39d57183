// src/export.rs
//! Flat-file export: one CSV row per analyzed comment.

use std::io::Write;

use anyhow::Result;

use crate::types::CommentRecord;

pub const CSV_HEADER: [&str; 9] = [
    "published_at",
    "author",
    "language",
    "like_count",
    "text",
    "translated_text",
    "sentiment_score",
    "sentiment_label",
    "algorithm",
];

pub fn write_csv<W: Write>(records: &[CommentRecord], writer: W) -> Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(CSV_HEADER)?;
    for r in records {
        w.write_record(&[
            r.published_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            r.author.clone(),
            r.detected_language.clone(),
            r.like_count.to_string(),
            r.raw_text.clone(),
            r.translated_text.clone(),
            format!("{:.4}", r.sentiment_score),
            r.sentiment_label.as_str().to_string(),
            r.algorithm.as_str().to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

pub fn to_csv_bytes(records: &[CommentRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    Ok(buf)
}

pub fn csv_filename(video_id: &str) -> String {
    format!("sentiment_{video_id}.csv")
}
