//! Integration tests for the RIPS data model.

use rips_model::{
    AcRecord, Confidence, CorrectionKind, CorrectionRecord, ErrorCategory, FileKind, FileRecord,
    RunStatistics, UsRecord, ValidationError, ValidationReport,
};

fn sample_ac() -> AcRecord {
    AcRecord {
        num_factura: "F001".into(),
        cod_prestador: "123456789012".into(),
        tipo_documento: "CC".into(),
        num_documento: "123".into(),
        fecha_consulta: "15/03/2023".into(),
        num_autorizacion: String::new(),
        cod_consulta: "890201".into(),
        cod_consulta_sistema: String::new(),
        descripcion_consulta: String::new(),
        finalidad_consulta: "10".into(),
        causa_externa: "13".into(),
        diagnostico_principal: "A009".into(),
        diagnostico_relacionado1: String::new(),
        diagnostico_relacionado2: String::new(),
        diagnostico_relacionado3: String::new(),
        tipo_diagnostico_principal: "1".into(),
        valor_consulta: "35000".into(),
        valor_cuota_moderadora: "0".into(),
        valor_neto: "35000".into(),
        edad: "30".into(),
        unidad_medida_edad: "1".into(),
        sexo: "F".into(),
    }
}

#[test]
fn file_record_exposes_cross_file_keys() {
    let record = FileRecord::Ac(sample_ac());
    assert_eq!(record.kind(), FileKind::Ac);
    assert_eq!(record.num_factura(), Some("F001"));
    assert_eq!(record.patient_identity(), Some(("CC", "123")));
}

#[test]
fn us_record_has_no_invoice() {
    let record = FileRecord::Us(UsRecord {
        tipo_documento: "CC".into(),
        num_documento: "123".into(),
        cod_entidad_administradora: "EPS001".into(),
        tipo_usuario: "1".into(),
        primer_apellido: "GOMEZ".into(),
        segundo_apellido: String::new(),
        primer_nombre: "ANA".into(),
        segundo_nombre: String::new(),
        edad: "30".into(),
        unidad_medida_edad: "1".into(),
        sexo: "F".into(),
        cod_departamento: "11".into(),
        cod_municipio: "001".into(),
        zona_residencial: "U".into(),
        num_autorizacion: String::new(),
    });
    assert_eq!(record.num_factura(), None);
    assert_eq!(record.patient_identity(), Some(("CC", "123")));
}

#[test]
fn report_serializes_to_json() {
    let mut report = ValidationReport::default();
    report.errors.push(ValidationError::new(
        "AC0001.txt",
        2,
        "num_factura",
        "invoice 'F999' not present in AF",
        "Res. 2275/2023 - Validación cruzada",
        "register the invoice in AF or fix the number",
        ErrorCategory::Referential,
    ));
    report.corrections.push(CorrectionRecord::new(
        "AC0001.txt",
        2,
        "fecha_consulta",
        "2023-03-15",
        "15/03/2023",
        CorrectionKind::DateFormat,
        Confidence::High,
        "date rewritten to DD/MM/YYYY",
    ));
    report.stats = RunStatistics::default();
    report.stats.record_file("AC");

    let json = serde_json::to_string_pretty(&report).expect("serialize report");
    assert!(json.contains("\"referential\""));
    assert!(json.contains("\"date_format\""));
    assert!(json.contains("\"high\""));
    assert!(json.contains("\"files_processed\": 1"));
}
