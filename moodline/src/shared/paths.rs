// 输出文件命名约定
//
// chat.json -> chat_cleaned.json
// chat.json / chat_cleaned.json -> chat_emotions.json

use std::path::{Path, PathBuf};

const CLEANED_SUFFIX: &str = "_cleaned";
const EMOTIONS_SUFFIX: &str = "_emotions";

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chat".to_string())
}

fn sibling(path: &Path, file_name: String) -> PathBuf {
    match path.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// 清洗结果文件路径
pub fn cleaned_path_for(input: &Path) -> PathBuf {
    let stem = stem_of(input);
    sibling(input, format!("{}{}.json", stem, CLEANED_SUFFIX))
}

/// 情感分析报告文件路径
pub fn report_path_for(input: &Path) -> PathBuf {
    let stem = stem_of(input);
    let base = stem.strip_suffix(CLEANED_SUFFIX).unwrap_or(&stem);
    sibling(input, format!("{}{}.json", base, EMOTIONS_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaned_path() {
        assert_eq!(
            cleaned_path_for(Path::new("exports/result.json")),
            PathBuf::from("exports/result_cleaned.json")
        );
    }

    #[test]
    fn test_report_path_strips_cleaned_suffix() {
        assert_eq!(
            report_path_for(Path::new("result_cleaned.json")),
            PathBuf::from("result_emotions.json")
        );
        assert_eq!(
            report_path_for(Path::new("/tmp/result.json")),
            PathBuf::from("/tmp/result_emotions.json")
        );
    }
}
