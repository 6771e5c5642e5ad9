//! Cross-file reference index and duplicate detection.
//!
//! The engine builds a [`ReferenceIndex`] from every AF and US record
//! (phase 1), checks each dependent record against it while accumulating
//! attention entries (phase 2), and finally reports duplicates (phase 3).
//! The index is read-only once built; a missing reference is an expected,
//! reportable outcome, so every lookup returns a plain boolean.

use std::collections::BTreeMap;

use rips_model::{ErrorCategory, FileRecord, ValidationError};

const CROSS_RULE: &str = "Res. 2275/2023 - Validación cruzada";
const INTEGRITY_RULE: &str = "Res. 2275/2023 - Validación de integridad";
const QUALITY_RULE: &str = "Res. 2275/2023 - Validación de calidad de datos";

/// Invoice numbers (from AF) and patient identities (from US) with
/// occurrence counters.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    invoices: BTreeMap<String, u32>,
    patients: BTreeMap<(String, String), u32>,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an AF or US record. Other kinds are ignored.
    pub fn register(&mut self, record: &FileRecord) {
        match record {
            FileRecord::Af(af) => {
                if !af.num_factura.trim().is_empty() {
                    *self.invoices.entry(af.num_factura.clone()).or_default() += 1;
                }
            }
            FileRecord::Us(us) => {
                if !us.tipo_documento.trim().is_empty() && !us.num_documento.trim().is_empty() {
                    let key = (us.tipo_documento.clone(), us.num_documento.clone());
                    *self.patients.entry(key).or_default() += 1;
                }
            }
            _ => {}
        }
    }

    pub fn contains_invoice(&self, num_factura: &str) -> bool {
        self.invoices.contains_key(num_factura)
    }

    pub fn contains_patient(&self, tipo_documento: &str, num_documento: &str) -> bool {
        self.patients
            .contains_key(&(tipo_documento.to_string(), num_documento.to_string()))
    }

    pub fn invoice_count(&self) -> usize {
        self.invoices.len()
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    /// One `Integrity` error per invoice or patient registered more than
    /// once, in key order.
    pub fn duplicate_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (factura, count) in &self.invoices {
            if *count > 1 {
                errors.push(ValidationError::new(
                    "AF (archivo)",
                    0,
                    "num_factura",
                    format!(
                        "La factura '{factura}' aparece {count} veces en el archivo AF (duplicado)"
                    ),
                    INTEGRITY_RULE,
                    "Verificar y eliminar facturas duplicadas",
                    ErrorCategory::Integrity,
                ));
            }
        }
        for ((tipo_doc, num_doc), count) in &self.patients {
            if *count > 1 {
                errors.push(ValidationError::new(
                    "US (archivo)",
                    0,
                    "tipo_documento/num_documento",
                    format!(
                        "El usuario {tipo_doc} {num_doc} aparece {count} veces en el archivo US \
                         (duplicado)"
                    ),
                    INTEGRITY_RULE,
                    "Verificar y eliminar usuarios duplicados",
                    ErrorCategory::Integrity,
                ));
            }
        }
        errors
    }
}

/// Check a dependent record's invoice and patient identity against the
/// index. The two lookups are independent: a record with both unregistered
/// yields exactly two errors. Empty keys are skipped here; requiredness is
/// the field rules' concern.
pub fn validate_references(
    record: &FileRecord,
    index: &ReferenceIndex,
    file_name: &str,
    line_number: usize,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if !record.kind().is_dependent() {
        return errors;
    }

    if let Some(num_factura) = record.num_factura()
        && !num_factura.trim().is_empty()
        && !index.contains_invoice(num_factura)
    {
        errors.push(ValidationError::new(
            file_name,
            line_number,
            "num_factura",
            format!("La factura '{num_factura}' no existe en el archivo AF"),
            CROSS_RULE,
            "Verificar que la factura esté registrada en el archivo AF o corregir el número",
            ErrorCategory::Referential,
        ));
    }

    if let Some((tipo_doc, num_doc)) = record.patient_identity()
        && !tipo_doc.trim().is_empty()
        && !num_doc.trim().is_empty()
        && !index.contains_patient(tipo_doc, num_doc)
    {
        errors.push(ValidationError::new(
            file_name,
            line_number,
            "tipo_documento/num_documento",
            format!("El usuario {tipo_doc} {num_doc} no existe en el archivo US"),
            CROSS_RULE,
            "Verificar que el usuario esté registrado en el archivo US",
            ErrorCategory::Referential,
        ));
    }

    errors
}

/// The kind of billable event an attention entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AttentionKind {
    Consultation,
    Procedure,
    Service,
}

impl AttentionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Consultation => "consulta",
            Self::Procedure => "procedimiento",
            Self::Service => "servicio",
        }
    }
}

impl std::fmt::Display for AttentionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Grouping key for duplicate-attention detection: one patient on one day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AttentionKey {
    pub document_type: String,
    pub document_number: String,
    pub service_date: String,
}

/// One billable event under an [`AttentionKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttentionEntry {
    pub kind: AttentionKind,
    pub code: String,
    pub source_file: String,
    pub record_index: usize,
}

/// Accumulator for attention entries, bucketed by key in input order.
#[derive(Debug, Clone, Default)]
pub struct AttentionLog {
    buckets: BTreeMap<AttentionKey, Vec<AttentionEntry>>,
}

impl AttentionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: AttentionKey, entry: AttentionEntry) {
        self.buckets.entry(key).or_default().push(entry);
    }

    /// Patients that had at least one attention registered.
    pub fn patient_day_count(&self) -> usize {
        self.buckets.len()
    }

    /// Within each bucket, every entry beyond the first sharing both kind
    /// and code is a duplicate; the error cites both occurrences. The first
    /// occurrence is the baseline and is never reported.
    pub fn detect_duplicates(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (key, entries) in &self.buckets {
            if entries.len() < 2 {
                continue;
            }
            let mut seen: BTreeMap<(AttentionKind, &str), &AttentionEntry> = BTreeMap::new();
            for entry in entries {
                let dedupe_key = (entry.kind, entry.code.as_str());
                match seen.get(&dedupe_key) {
                    Some(first) => {
                        errors.push(ValidationError::new(
                            entry.source_file.clone(),
                            entry.record_index,
                            "duplicado_atencion",
                            format!(
                                "Atención duplicada detectada: Usuario {} {} tiene {} duplicada \
                                 el {} (código: {}). También registrada en {} línea {}",
                                key.document_type,
                                key.document_number,
                                entry.kind,
                                key.service_date,
                                entry.code,
                                first.source_file,
                                first.record_index,
                            ),
                            QUALITY_RULE,
                            "Verificar si se trata de un error de digitación o una atención \
                             real. Eliminar el registro duplicado si no corresponde.",
                            ErrorCategory::Integrity,
                        ));
                    }
                    None => {
                        seen.insert(dedupe_key, entry);
                    }
                }
            }
        }

        errors
    }
}
