use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::modules::analysis::{
    AggregateReport, AggregateReportQuery, AnalysisModule, FileReportRepository,
    LabelDistribution,
};
use crate::shared::AppResult;

/// 聚合已保存的报告并打印每个作者的统计
pub async fn stats(
    report_path: &Path,
    json_output: Option<PathBuf>,
) -> AppResult<AggregateReport> {
    let module = AnalysisModule::new(Arc::new(FileReportRepository::new(report_path)));
    let response = module.aggregate(AggregateReportQuery).await?;

    println!("Model: {}", response.model);
    println!("{}", render_aggregate(&response.aggregate));

    if let Some(path) = json_output {
        let content = serde_json::to_string_pretty(&response.aggregate)?;
        tokio::fs::write(&path, content).await?;
        tracing::info!("Aggregate written to {}", path.display());
        println!("Saved to {}", path.display());
    }

    Ok(response.aggregate)
}

/// 渲染聚合结果
pub fn render_aggregate(aggregate: &AggregateReport) -> String {
    let mut lines = vec![format!(
        "Messages: {} (smoothing window {})",
        aggregate.total_messages, aggregate.window_size
    )];

    match aggregate.mean_mood {
        Some(mean) => lines.push(format!("Overall mean mood: {:.2}/10", mean)),
        None => lines.push("Overall mean mood: n/a".to_string()),
    }
    push_distribution(&mut lines, &aggregate.distribution);

    for author in &aggregate.authors {
        lines.push(String::new());
        lines.push(if author.author.is_empty() {
            "(unknown author)".to_string()
        } else {
            author.author.clone()
        });
        lines.push(format!("  Messages: {}", author.message_count));
        lines.push(format!("  Mean mood: {:.2}/10", author.mean_mood));
        push_distribution(&mut lines, &author.distribution);
    }

    lines.join("\n")
}

fn push_distribution(lines: &mut Vec<String>, distribution: &LabelDistribution) {
    for share in &distribution.shares {
        lines.push(format!(
            "  {}: {} ({:.1}%), score {}",
            share.emotion,
            share.count,
            share.percentage,
            share.emotion.mood_score()
        ));
    }
}
