//! Preset Transfer Service - Portable export files and conflict-aware import
//!
//! Export wraps presets in a versioned envelope:
//!
//! ```text
//! { "version": 1, "type": "single" | "batch", "exportedAt": <ms>, "presets": [...] }
//! ```
//!
//! Import validates the envelope as a whole, partitions the presets into
//! conflicting and free names, then applies a resolution per conflict.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::preset_service::{now_millis, PresetService};
use crate::application::ports::outbound::{Notification, PresetRepositoryError};
use crate::domain::entities::{CharacterPreset, PresetStorage};

/// Envelope format version written by this build
pub const EXPORT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportType {
    Single,
    Batch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetExportFile {
    pub version: u32,
    #[serde(rename = "type")]
    pub export_type: ExportType,
    pub exported_at: i64,
    pub presets: Vec<CharacterPreset>,
}

/// A serialized export ready to hand to a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportResolution {
    #[default]
    Overwrite,
    Rename,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConflict {
    pub preset: CharacterPreset,
    #[serde(default)]
    pub resolution: ImportResolution,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictReport {
    pub conflicts: Vec<ImportConflict>,
    pub no_conflicts: Vec<CharacterPreset>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub overwritten: usize,
    pub renamed: usize,
}

impl ImportResult {
    pub fn written(&self) -> usize {
        self.imported + self.overwritten + self.renamed
    }

    pub fn total(&self) -> usize {
        self.written() + self.skipped
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("{0}")]
    Validation(String),
    #[error("Preset storage error: {0}")]
    Repository(#[from] PresetRepositoryError),
}

pub struct PresetTransferService {
    presets: Arc<PresetService>,
}

impl PresetTransferService {
    pub fn new(presets: Arc<PresetService>) -> Self {
        Self { presets }
    }

    /// Export one stored preset; `None` when it does not exist
    #[instrument(skip(self))]
    pub async fn export_preset(
        &self,
        name: &str,
    ) -> Result<Option<ExportedDocument>, ImportError> {
        let Some(preset) = self.presets.get(name).await? else {
            return Ok(None);
        };

        let file = PresetExportFile {
            version: EXPORT_VERSION,
            export_type: ExportType::Single,
            exported_at: now_millis(),
            presets: vec![preset],
        };
        let document = ExportedDocument {
            file_name: format!("{}.preset.json", name),
            content: render(&file)?,
        };

        self.presets
            .notifier()
            .notify(Notification::success(format!("预设「{}」已导出", name)));
        Ok(Some(document))
    }

    /// Export every preset in list order; `None` when there are none
    #[instrument(skip(self))]
    pub async fn export_all(&self) -> Result<Option<ExportedDocument>, ImportError> {
        let presets = self.presets.list().await?;
        if presets.is_empty() {
            warn!("No presets to export");
            self.presets
                .notifier()
                .notify(Notification::warning("没有可导出的预设"));
            return Ok(None);
        }

        let count = presets.len();
        let file = PresetExportFile {
            version: EXPORT_VERSION,
            export_type: ExportType::Batch,
            exported_at: now_millis(),
            presets,
        };
        let document = ExportedDocument {
            file_name: format!("所有预设_{}.presets.json", Utc::now().format("%Y-%m-%d")),
            content: render(&file)?,
        };

        self.presets
            .notifier()
            .notify(Notification::success(format!("已导出 {} 个预设", count)));
        Ok(Some(document))
    }

    /// Parse and validate an import document, notifying on rejection
    pub fn validate_text(&self, text: &str) -> Result<PresetExportFile, ImportError> {
        let result = serde_json::from_str::<Value>(text)
            .map_err(|_| ImportError::Validation("导入失败：文件不是有效的 JSON".to_string()))
            .and_then(|value| validate_export_file(&value));
        self.report_validation(result)
    }

    pub fn validate(&self, document: &Value) -> Result<PresetExportFile, ImportError> {
        self.report_validation(validate_export_file(document))
    }

    fn report_validation(
        &self,
        result: Result<PresetExportFile, ImportError>,
    ) -> Result<PresetExportFile, ImportError> {
        if let Err(ImportError::Validation(message)) = &result {
            warn!(%message, "Import document rejected");
            self.presets.notifier().notify(Notification::error(message.clone()));
        }
        result
    }

    /// Split presets by whether their name is already taken.
    ///
    /// A name repeated within the batch conflicts with its earlier copy.
    pub async fn detect_conflicts(
        &self,
        presets: Vec<CharacterPreset>,
    ) -> Result<ConflictReport, ImportError> {
        let storage = self.presets.load_storage().await?;
        let mut seen: HashSet<String> = HashSet::new();
        let mut report = ConflictReport::default();

        for preset in presets {
            let taken = storage.contains(&preset.name) || seen.contains(&preset.name);
            seen.insert(preset.name.clone());
            if taken {
                report.conflicts.push(ImportConflict {
                    preset,
                    resolution: ImportResolution::Overwrite,
                });
            } else {
                report.no_conflicts.push(preset);
            }
        }
        Ok(report)
    }

    /// `name (n)` with the smallest `n >= 1` not currently stored
    pub async fn generate_unique_name(&self, name: &str) -> Result<String, ImportError> {
        let storage = self.presets.load_storage().await?;
        Ok(unique_name(&storage, name))
    }

    #[instrument(skip_all, fields(free = no_conflicts.len(), conflicts = resolved.len()))]
    pub async fn execute_import(
        &self,
        no_conflicts: Vec<CharacterPreset>,
        resolved: Vec<ImportConflict>,
    ) -> Result<ImportResult, ImportError> {
        let mut result = ImportResult::default();

        for mut preset in no_conflicts {
            let now = now_millis();
            if preset.created_at == 0 {
                preset.created_at = now;
            }
            preset.updated_at = now;
            if self.presets.save(preset, false).await?.is_saved() {
                result.imported += 1;
            } else {
                result.skipped += 1;
            }
        }

        for ImportConflict { mut preset, resolution } in resolved {
            match resolution {
                ImportResolution::Overwrite => {
                    preset.updated_at = now_millis();
                    self.presets.save(preset, true).await?;
                    result.overwritten += 1;
                }
                ImportResolution::Rename => {
                    preset.name = self.generate_unique_name(&preset.name).await?;
                    let now = now_millis();
                    preset.created_at = now;
                    preset.updated_at = now;
                    self.presets.save(preset, false).await?;
                    result.renamed += 1;
                }
                ImportResolution::Skip => result.skipped += 1,
            }
        }

        self.report_import(&result);
        info!(?result, "Import finished");
        Ok(result)
    }

    /// Validate, detect conflicts and import in one call.
    ///
    /// Conflicts take the resolution given for their name, `overwrite`
    /// when none is given.
    pub async fn import_document(
        &self,
        document: &Value,
        resolutions: &HashMap<String, ImportResolution>,
    ) -> Result<ImportResult, ImportError> {
        let file = self.validate(document)?;
        let mut report = self.detect_conflicts(file.presets).await?;
        for conflict in &mut report.conflicts {
            if let Some(resolution) = resolutions.get(&conflict.preset.name) {
                conflict.resolution = *resolution;
            }
        }
        self.execute_import(report.no_conflicts, report.conflicts).await
    }

    fn report_import(&self, result: &ImportResult) {
        let written = result.written();
        if written > 0 {
            let mut parts = vec![format!("成功导入 {} 个预设", written)];
            if result.overwritten > 0 {
                parts.push(format!("覆盖 {} 个", result.overwritten));
            }
            if result.renamed > 0 {
                parts.push(format!("重命名 {} 个", result.renamed));
            }
            if result.skipped > 0 {
                parts.push(format!("跳过 {} 个", result.skipped));
            }
            self.presets
                .notifier()
                .notify(Notification::success(parts.join("，")));
        } else if result.skipped > 0 {
            self.presets.notifier().notify(Notification::info(format!(
                "已跳过所有 {} 个冲突预设",
                result.skipped
            )));
        }
    }
}

fn render(file: &PresetExportFile) -> Result<String, ImportError> {
    serde_json::to_string_pretty(file)
        .map_err(|e| ImportError::Repository(PresetRepositoryError::Serialization(e.to_string())))
}

fn unique_name(storage: &PresetStorage, name: &str) -> String {
    (1..)
        .map(|n| format!("{} ({})", name, n))
        .find(|candidate| !storage.contains(candidate))
        .unwrap_or_else(|| name.to_string())
}

/// Envelope validation; all-or-nothing
pub fn validate_export_file(document: &Value) -> Result<PresetExportFile, ImportError> {
    let invalid = |message: &str| ImportError::Validation(format!("导入失败：{}", message));

    let Some(file) = document.as_object() else {
        return Err(invalid("文件格式不正确"));
    };
    if !file.contains_key("version") || !file.contains_key("presets") {
        return Err(invalid("缺少必要字段（version/presets）"));
    }
    let Some(raw_presets) = file.get("presets").and_then(Value::as_array) else {
        return Err(invalid("presets 字段格式不正确"));
    };

    for raw in raw_presets {
        let missing: Vec<&str> = ["name", "character"]
            .into_iter()
            .filter(|field| raw.get(field).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(invalid(&format!("预设缺少必要字段（{}）", missing.join(", "))));
        }
    }

    let version = file
        .get("version")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| invalid("version 字段格式不正确"))?;

    let export_type = match file.get("type").and_then(Value::as_str) {
        Some("batch") => ExportType::Batch,
        _ => ExportType::Single,
    };

    let exported_at = file
        .get("exportedAt")
        .and_then(Value::as_i64)
        .filter(|at| *at != 0)
        .unwrap_or_else(now_millis);

    let presets = raw_presets
        .iter()
        .map(|raw| serde_json::from_value::<CharacterPreset>(raw.clone()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| invalid(&format!("预设格式不正确（{}）", e)))?;

    Ok(PresetExportFile {
        version,
        export_type,
        exported_at,
        presets,
    })
}
