//! Localized user-facing messages.

use std::fmt;

use fusion_core::Stage;
use serde::{Deserialize, Serialize};

/// Product whose users default to Chinese when their language is unsupported.
const CHINESE_PRODUCT: &str = "feishu";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    /// Maps a host language tag to a supported language.
    ///
    /// `zh`, `zh-HK` and `zh-TW` map to Chinese and `en` to English. Any other
    /// tag falls back on the product: Chinese for `feishu`, English otherwise.
    pub fn resolve(tag: &str, product: Option<&str>) -> Self {
        match tag.trim() {
            "en" => Self::En,
            "zh" | "zh-HK" | "zh-TW" => Self::Zh,
            _ if product.is_some_and(|p| p.trim().eq_ignore_ascii_case(CHINESE_PRODUCT)) => {
                Self::Zh
            }
            _ => Self::En,
        }
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Self::En => &EN,
            Self::Zh => &ZH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct Messages {
    pub title: &'static str,
    pub sources_heading: &'static str,
    pub output_warning: &'static str,
    pub start: &'static str,
    pub success: &'static str,
    pub failure: &'static str,
    pub too_few_sources: &'static str,
    pub read: &'static str,
    pub transform: &'static str,
    pub fuse: &'static str,
    pub switch_view: &'static str,
    pub clear: &'static str,
    pub write: &'static str,
}

impl Messages {
    pub fn stage(&self, stage: Stage) -> &'static str {
        match stage {
            Stage::Read => self.read,
            Stage::Transform => self.transform,
            Stage::Fuse => self.fuse,
            Stage::SwitchView => self.switch_view,
            Stage::Clear => self.clear,
            Stage::Write => self.write,
            Stage::Done => self.success,
        }
    }
}

static EN: Messages = Messages {
    title: "Data Table Fusion (Cartesian Product)",
    sources_heading: "Tables available for fusion",
    output_warning: "Running the fusion clears the existing data in the result table",
    start: "Start Fusion",
    success: "Fusion Success",
    failure: "Fusion Failed",
    too_few_sources: "Please select at least two tables to be fused",
    read: "Read Table Data",
    transform: "Transform Table Data",
    fuse: "Fuse Table Data",
    switch_view: "Open Result Table",
    clear: "Clear existing data in the result table",
    write: "Write fused data to the result table",
};

static ZH: Messages = Messages {
    title: "数据表融合（笛卡尔积）",
    sources_heading: "可融合的数据表",
    output_warning: "执行融合将清空结果表中原有数据",
    start: "开始融合",
    success: "融合成功",
    failure: "融合失败",
    too_few_sources: "请至少选择两张要融合的数据表",
    read: "读取表数据",
    transform: "转换表数据",
    fuse: "融合表数据",
    switch_view: "打开结果表",
    clear: "清空结果表中原有数据",
    write: "将融合后数据写入结果表",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chinese_tags_resolve_to_zh() {
        for tag in ["zh", "zh-HK", "zh-TW"] {
            assert_eq!(Language::resolve(tag, None), Language::Zh, "{tag}");
        }
    }

    #[test]
    fn english_ignores_product() {
        assert_eq!(Language::resolve("en", Some("feishu")), Language::En);
    }

    #[test]
    fn unsupported_tag_falls_back_on_product() {
        assert_eq!(Language::resolve("ja", Some("feishu")), Language::Zh);
        assert_eq!(Language::resolve("ja", Some("lark")), Language::En);
        assert_eq!(Language::resolve("fr", None), Language::En);
        assert_eq!(Language::resolve("zh-CN", None), Language::En);
    }

    #[test]
    fn every_stage_has_a_label() {
        for language in [Language::En, Language::Zh] {
            let messages = language.messages();
            for stage in Stage::ALL {
                assert!(!messages.stage(stage).is_empty());
            }
        }
        assert_eq!(Language::Zh.messages().stage(Stage::Done), "融合成功");
    }
}
