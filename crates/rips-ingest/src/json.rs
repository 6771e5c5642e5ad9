//! Consolidated JSON ingestion.
//!
//! The consolidated form carries one document with a `usuarios` array;
//! each user nests its services under `servicios.consultas`,
//! `servicios.procedimientos`, `servicios.hospitalizacion` and
//! `servicios.recienNacidos`. This module flattens the document into the
//! same positional rows the flat files use, so the whole validation
//! pipeline downstream is shared.
//!
//! Boundary normalizations (these are format conversions, not
//! corrections): ISO timestamps are reduced to their date part and
//! rendered DD/MM/YYYY, ages are derived from `fechaNacimiento` against
//! the run's reference date, and territorial zone codes 01/02 map to U/R.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use rips_model::FileKind;

use crate::error::IngestError;
use crate::flat_file::{RawRow, SourceFile};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ConsolidatedDocument {
    num_factura: String,
    usuarios: Vec<UsuarioJson>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct UsuarioJson {
    tipo_documento_identificacion: String,
    num_documento_identificacion: String,
    cod_entidad_administradora: String,
    tipo_usuario: String,
    fecha_nacimiento: String,
    cod_sexo: String,
    cod_municipio_residencia: String,
    cod_zona_territorial_residencia: String,
    servicios: ServiciosJson,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ServiciosJson {
    consultas: Vec<ConsultaJson>,
    procedimientos: Vec<ProcedimientoJson>,
    hospitalizacion: Vec<HospitalizacionJson>,
    recien_nacidos: Vec<RecienNacidoJson>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ConsultaJson {
    cod_prestador: String,
    fecha_inicio_atencion: String,
    num_autorizacion: String,
    cod_consulta: String,
    finalidad_tecnologia_salud: String,
    causa_motivo_atencion: String,
    cod_diagnostico_principal: String,
    cod_diagnostico_relacionado1: String,
    cod_diagnostico_relacionado2: String,
    cod_diagnostico_relacionado3: String,
    tipo_diagnostico_principal: String,
    vr_servicio: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ProcedimientoJson {
    cod_prestador: String,
    fecha_inicio_atencion: String,
    num_autorizacion: String,
    cod_procedimiento: String,
    finalidad_tecnologia_salud: String,
    cod_diagnostico_principal: String,
    cod_diagnostico_relacionado: String,
    cod_complicacion: String,
    vr_servicio: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct HospitalizacionJson {
    cod_prestador: String,
    via_ingreso_servicio_salud: String,
    fecha_inicio_atencion: String,
    num_autorizacion: String,
    causa_motivo_atencion: String,
    cod_diagnostico_principal: String,
    cod_diagnostico_principal_e: String,
    condicion_destino_usuario_egreso: String,
    fecha_egreso: String,
    vr_servicio: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RecienNacidoJson {
    cod_prestador: String,
    fecha_nacimiento: String,
    edad_gestacional: Value,
    peso: Value,
    cod_sexo: String,
    cod_diagnostico_principal: String,
    tipo_parto: String,
}

/// Read a consolidated JSON document and flatten it into per-kind
/// [`SourceFile`]s (US plus one per service array that has entries). Row
/// numbers are 1-based entry indices within each kind, and each synthetic
/// file is named `<document>#<kind>` so findings point at the service
/// array they came from.
pub fn read_consolidated_json(
    path: &Path,
    reference_date: NaiveDate,
) -> Result<Vec<SourceFile>, IngestError> {
    let name = path
        .file_name()
        .and_then(|v| v.to_str())
        .unwrap_or_default()
        .to_string();

    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    // Tolerate a UTF-8 BOM, common in exports from Windows tooling.
    let content = String::from_utf8_lossy(&bytes);
    let content = content.trim_start_matches('\u{FEFF}');

    let document: ConsolidatedDocument =
        serde_json::from_str(content).map_err(|source| IngestError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let mut us_rows = Vec::new();
    let mut ac_rows = Vec::new();
    let mut ap_rows = Vec::new();
    let mut ah_rows = Vec::new();
    let mut an_rows = Vec::new();

    for usuario in &document.usuarios {
        let tipo_doc = usuario.tipo_documento_identificacion.clone();
        let num_doc = usuario.num_documento_identificacion.clone();
        let edad = derived_age(&usuario.fecha_nacimiento, reference_date);
        let sexo = usuario.cod_sexo.clone();
        let (departamento, municipio) = split_municipality(&usuario.cod_municipio_residencia);

        us_rows.push(vec![
            tipo_doc.clone(),
            num_doc.clone(),
            usuario.cod_entidad_administradora.clone(),
            usuario.tipo_usuario.clone(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            edad.clone(),
            "1".to_string(),
            sexo.clone(),
            departamento,
            municipio,
            zone_code(&usuario.cod_zona_territorial_residencia),
            String::new(),
        ]);

        for consulta in &usuario.servicios.consultas {
            let valor = value_to_string(&consulta.vr_servicio);
            ac_rows.push(vec![
                document.num_factura.clone(),
                consulta.cod_prestador.clone(),
                tipo_doc.clone(),
                num_doc.clone(),
                iso_to_dmy(&consulta.fecha_inicio_atencion),
                consulta.num_autorizacion.clone(),
                consulta.cod_consulta.clone(),
                String::new(),
                String::new(),
                consulta.finalidad_tecnologia_salud.clone(),
                consulta.causa_motivo_atencion.clone(),
                consulta.cod_diagnostico_principal.clone(),
                consulta.cod_diagnostico_relacionado1.clone(),
                consulta.cod_diagnostico_relacionado2.clone(),
                consulta.cod_diagnostico_relacionado3.clone(),
                consulta.tipo_diagnostico_principal.clone(),
                valor.clone(),
                "0".to_string(),
                valor,
                edad.clone(),
                "1".to_string(),
                sexo.clone(),
            ]);
        }

        for procedimiento in &usuario.servicios.procedimientos {
            let valor = value_to_string(&procedimiento.vr_servicio);
            ap_rows.push(vec![
                document.num_factura.clone(),
                procedimiento.cod_prestador.clone(),
                tipo_doc.clone(),
                num_doc.clone(),
                iso_to_dmy(&procedimiento.fecha_inicio_atencion),
                procedimiento.num_autorizacion.clone(),
                procedimiento.cod_procedimiento.clone(),
                String::new(),
                String::new(),
                String::new(),
                procedimiento.finalidad_tecnologia_salud.clone(),
                String::new(),
                procedimiento.cod_diagnostico_principal.clone(),
                procedimiento.cod_diagnostico_relacionado.clone(),
                procedimiento.cod_complicacion.clone(),
                String::new(),
                valor.clone(),
                "0".to_string(),
                valor,
                edad.clone(),
                "1".to_string(),
                sexo.clone(),
            ]);
        }

        for hospitalizacion in &usuario.servicios.hospitalizacion {
            let valor = value_to_string(&hospitalizacion.vr_servicio);
            ah_rows.push(vec![
                document.num_factura.clone(),
                hospitalizacion.cod_prestador.clone(),
                tipo_doc.clone(),
                num_doc.clone(),
                hospitalizacion.via_ingreso_servicio_salud.clone(),
                iso_to_dmy(&hospitalizacion.fecha_inicio_atencion),
                String::new(),
                hospitalizacion.num_autorizacion.clone(),
                hospitalizacion.causa_motivo_atencion.clone(),
                hospitalizacion.cod_diagnostico_principal.clone(),
                hospitalizacion.cod_diagnostico_principal_e.clone(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                hospitalizacion.condicion_destino_usuario_egreso.clone(),
                String::new(),
                iso_to_dmy(&hospitalizacion.fecha_egreso),
                String::new(),
                valor.clone(),
                "0".to_string(),
                valor,
            ]);
        }

        for recien_nacido in &usuario.servicios.recien_nacidos {
            an_rows.push(vec![
                document.num_factura.clone(),
                recien_nacido.cod_prestador.clone(),
                tipo_doc.clone(),
                num_doc.clone(),
                iso_to_dmy(&recien_nacido.fecha_nacimiento),
                String::new(),
                value_to_string(&recien_nacido.edad_gestacional),
                String::new(),
                recien_nacido.cod_sexo.clone(),
                value_to_string(&recien_nacido.peso),
                recien_nacido.cod_diagnostico_principal.clone(),
                String::new(),
                String::new(),
                recien_nacido.tipo_parto.clone(),
            ]);
        }
    }

    let mut files = Vec::new();
    for (kind, rows) in [
        (FileKind::Us, us_rows),
        (FileKind::Ac, ac_rows),
        (FileKind::Ap, ap_rows),
        (FileKind::Ah, ah_rows),
        (FileKind::An, an_rows),
    ] {
        if rows.is_empty() {
            continue;
        }
        debug!(file = %name, kind = %kind, rows = rows.len(), "flattened JSON records");
        files.push(SourceFile {
            name: format!("{name}#{kind}"),
            kind,
            rows: rows
                .into_iter()
                .enumerate()
                .map(|(index, fields)| RawRow {
                    line_number: index + 1,
                    fields,
                })
                .collect(),
        });
    }
    Ok(files)
}

/// Render a JSON scalar as the raw string the validators expect.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// `YYYY-MM-DD[ HH:MM]` to `DD/MM/YYYY`; anything else is passed through
/// for the validators to flag.
fn iso_to_dmy(raw: &str) -> String {
    let date_part = raw.trim().get(..10).unwrap_or(raw.trim());
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => raw.trim().to_string(),
    }
}

/// Age in completed years against the reference date, empty when the birth
/// date is missing or malformed.
fn derived_age(fecha_nacimiento: &str, reference_date: NaiveDate) -> String {
    let date_part = fecha_nacimiento
        .trim()
        .get(..10)
        .unwrap_or(fecha_nacimiento.trim());
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .and_then(|birth| reference_date.years_since(birth))
        .map(|years| years.to_string())
        .unwrap_or_default()
}

/// Split a five-digit DANE municipality code into department (2) and
/// municipality (3) parts; shorter values land unsplit in the municipality
/// field for the validators to flag.
fn split_municipality(raw: &str) -> (String, String) {
    let trimmed = raw.trim();
    if trimmed.len() >= 5 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        (trimmed[..2].to_string(), trimmed[2..5].to_string())
    } else {
        (String::new(), trimmed.to_string())
    }
}

/// Territorial zone 01 (urbana) / 02 (rural) to the flat-file U/R codes.
fn zone_code(raw: &str) -> String {
    match raw.trim() {
        "01" | "U" => "U".to_string(),
        "02" | "R" => "R".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn test_iso_to_dmy() {
        assert_eq!(iso_to_dmy("2023-03-15"), "15/03/2023");
        assert_eq!(iso_to_dmy("2023-03-15 10:30"), "15/03/2023");
        assert_eq!(iso_to_dmy("15/03/2023"), "15/03/2023");
        assert_eq!(iso_to_dmy("sin fecha"), "sin fecha");
    }

    #[test]
    fn test_derived_age() {
        assert_eq!(derived_age("1990-06-30", reference()), "34");
        assert_eq!(derived_age("1990-07-01", reference()), "33");
        assert_eq!(derived_age("", reference()), "");
    }

    #[test]
    fn test_read_consolidated_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rips.json");
        std::fs::write(
            &path,
            r#"{
              "numFactura": "F001",
              "usuarios": [
                {
                  "tipoDocumentoIdentificacion": "CC",
                  "numDocumentoIdentificacion": "123",
                  "fechaNacimiento": "1994-01-15",
                  "codSexo": "F",
                  "codMunicipioResidencia": "11001",
                  "codZonaTerritorialResidencia": "01",
                  "servicios": {
                    "consultas": [
                      {
                        "codPrestador": "123456789012",
                        "fechaInicioAtencion": "2023-03-15 08:30",
                        "codConsulta": "890201",
                        "finalidadTecnologiaSalud": "10",
                        "codDiagnosticoPrincipal": "A009",
                        "vrServicio": 35000
                      }
                    ]
                  }
                }
              ]
            }"#,
        )
        .unwrap();

        let files = read_consolidated_json(&path, reference()).unwrap();
        assert_eq!(files.len(), 2);

        let us = files.iter().find(|f| f.kind == FileKind::Us).unwrap();
        assert_eq!(us.name, "rips.json#US");
        assert_eq!(us.rows.len(), 1);
        assert_eq!(us.rows[0].fields.len(), FileKind::Us.field_count());
        assert_eq!(us.rows[0].fields[0], "CC");
        assert_eq!(us.rows[0].fields[11], "11");
        assert_eq!(us.rows[0].fields[12], "001");
        assert_eq!(us.rows[0].fields[13], "U");

        let ac = files.iter().find(|f| f.kind == FileKind::Ac).unwrap();
        assert_eq!(ac.rows[0].fields.len(), FileKind::Ac.field_count());
        assert_eq!(ac.rows[0].fields[0], "F001");
        assert_eq!(ac.rows[0].fields[4], "15/03/2023");
        assert_eq!(ac.rows[0].fields[16], "35000");
    }

    #[test]
    fn test_malformed_json_is_an_ingest_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("roto.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            read_consolidated_json(&path, reference()),
            Err(IngestError::Json { .. })
        ));
    }
}
