#![allow(dead_code)]

use postboard_core::{Column, ColumnType, TabularResult};
use postboard_interface::PostQuery;
use postboard_pipeline::{Pipeline, RankKey, Ranker};
use postboard_source::{InMemoryExecutor, QuerySourceAdapter, required_columns};
use serde_json::{Value, json};

pub const TABLE: &str = "demo.facebook_data.posts";

pub fn columns() -> Vec<Column> {
    required_columns()
        .map(|name| {
            let ty = match name {
                "created_time" => ColumnType::Timestamp,
                "reach" | "like_count" | "comments_count" | "saved" => ColumnType::Integer,
                _ => ColumnType::String,
            };
            Column::new(name, ty)
        })
        .collect()
}

pub fn post_row(id: &str, reach: u64, likes: u64) -> Value {
    json!({
        "id": id,
        "created_time": 1_715_270_400.0,
        "caption": format!("Caption for {}", id),
        "media_type": "IMAGE",
        "source": format!("https://cdn.example.com/{}.jpg", id),
        "reach": reach,
        "like_count": likes,
        "comments_count": 2,
        "saved": 1,
    })
}

pub fn executor(rows: Vec<Value>) -> InMemoryExecutor {
    InMemoryExecutor::new(TabularResult::from_json_rows(columns(), rows).expect("rows are objects"))
}

pub fn pipeline(key: RankKey, top_n: usize) -> Pipeline {
    // No ORDER BY: the in-memory store keeps row order, which the
    // scenarios rely on for tie-breaking.
    let query = PostQuery::builder()
        .table(TABLE)
        .limit(100u64)
        .build()
        .expect("query builds");
    Pipeline::builder()
        .adapter(QuerySourceAdapter::new(query))
        .ranker(Ranker::new(key, top_n))
        .build()
        .expect("pipeline builds")
}
