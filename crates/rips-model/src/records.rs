//! Typed records for the nine RIPS file kinds.
//!
//! Field names and positions follow the official layout of Resolución 2275
//! de 2023. Every field is kept as the raw string submitted by the provider:
//! validation decides what is acceptable, the record itself never rejects a
//! value. Records are built once at the parse boundary and never mutated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The nine RIPS file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FileKind {
    /// AF - invoice header (transacciones).
    Af,
    /// US - patients (usuarios).
    Us,
    /// AC - consultations (consultas).
    Ac,
    /// AP - procedures (procedimientos).
    Ap,
    /// AT - other services (otros servicios).
    At,
    /// AH - hospitalizations (hospitalización).
    Ah,
    /// AM - medications (medicamentos).
    Am,
    /// AN - newborns (recién nacidos).
    An,
    /// CT - control file.
    Ct,
}

impl FileKind {
    /// Two-letter code as it appears in file names.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Af => "AF",
            Self::Us => "US",
            Self::Ac => "AC",
            Self::Ap => "AP",
            Self::At => "AT",
            Self::Ah => "AH",
            Self::Am => "AM",
            Self::An => "AN",
            Self::Ct => "CT",
        }
    }

    /// Fixed field count for delimited lines of this kind.
    pub const fn field_count(&self) -> usize {
        match self {
            Self::Af => 17,
            Self::Us => 15,
            Self::Ac => 22,
            Self::Ap => 22,
            Self::At => 14,
            Self::Ah => 22,
            Self::Am => 16,
            Self::An => 14,
            Self::Ct => 10,
        }
    }

    /// All kinds in canonical processing order (references first).
    pub const fn all() -> &'static [FileKind] {
        &[
            Self::Af,
            Self::Us,
            Self::Ac,
            Self::Ap,
            Self::At,
            Self::Ah,
            Self::Am,
            Self::An,
            Self::Ct,
        ]
    }

    /// True for kinds that reference AF invoices and US patients.
    pub const fn is_dependent(&self) -> bool {
        matches!(self, Self::Ac | Self::Ap | Self::At | Self::Ah | Self::Am)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for FileKind {
    type Err = UnknownFileKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AF" => Ok(Self::Af),
            "US" => Ok(Self::Us),
            "AC" => Ok(Self::Ac),
            "AP" => Ok(Self::Ap),
            "AT" => Ok(Self::At),
            "AH" => Ok(Self::Ah),
            "AM" => Ok(Self::Am),
            "AN" => Ok(Self::An),
            "CT" => Ok(Self::Ct),
            _ => Err(UnknownFileKind(s.to_string())),
        }
    }
}

/// Error returned when a code does not name a RIPS file kind.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown RIPS file kind: {0}")]
pub struct UnknownFileKind(pub String);

/// AF - invoice header record (17 fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfRecord {
    pub cod_prestador: String,
    pub nombre_prestador: String,
    pub tipo_documento_prestador: String,
    pub num_documento_prestador: String,
    pub num_factura: String,
    pub fecha_expedicion: String,
    pub fecha_inicio: String,
    pub fecha_final: String,
    pub cod_entidad_administradora: String,
    pub nombre_entidad_administradora: String,
    pub num_contrato: String,
    pub plan_beneficios: String,
    pub num_poliza: String,
    pub valor_comision: String,
    pub num_cuotas_moderadoras: String,
    pub valor_comision_cm: String,
    pub valor_neto: String,
}

/// US - patient record (15 fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsRecord {
    pub tipo_documento: String,
    pub num_documento: String,
    pub cod_entidad_administradora: String,
    pub tipo_usuario: String,
    pub primer_apellido: String,
    pub segundo_apellido: String,
    pub primer_nombre: String,
    pub segundo_nombre: String,
    pub edad: String,
    pub unidad_medida_edad: String,
    pub sexo: String,
    pub cod_departamento: String,
    pub cod_municipio: String,
    pub zona_residencial: String,
    pub num_autorizacion: String,
}

/// AC - consultation record (22 fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcRecord {
    pub num_factura: String,
    pub cod_prestador: String,
    pub tipo_documento: String,
    pub num_documento: String,
    pub fecha_consulta: String,
    pub num_autorizacion: String,
    pub cod_consulta: String,
    pub cod_consulta_sistema: String,
    pub descripcion_consulta: String,
    pub finalidad_consulta: String,
    pub causa_externa: String,
    pub diagnostico_principal: String,
    pub diagnostico_relacionado1: String,
    pub diagnostico_relacionado2: String,
    pub diagnostico_relacionado3: String,
    pub tipo_diagnostico_principal: String,
    pub valor_consulta: String,
    pub valor_cuota_moderadora: String,
    pub valor_neto: String,
    pub edad: String,
    pub unidad_medida_edad: String,
    pub sexo: String,
}

/// AP - procedure record (22 fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApRecord {
    pub num_factura: String,
    pub cod_prestador: String,
    pub tipo_documento: String,
    pub num_documento: String,
    pub fecha_procedimiento: String,
    pub num_autorizacion: String,
    pub cod_procedimiento: String,
    pub cod_procedimiento_sistema: String,
    pub descripcion_procedimiento: String,
    pub ambito_procedimiento: String,
    pub finalidad_procedimiento: String,
    pub personal_atiende: String,
    pub diagnostico_principal: String,
    pub diagnostico_relacionado: String,
    pub complicacion: String,
    pub forma_realizacion: String,
    pub valor_procedimiento: String,
    pub valor_cuota_moderadora: String,
    pub valor_neto: String,
    pub edad: String,
    pub unidad_medida_edad: String,
    pub sexo: String,
}

/// AT - other services record (14 fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtRecord {
    pub num_factura: String,
    pub cod_prestador: String,
    pub tipo_documento: String,
    pub num_documento: String,
    pub num_autorizacion: String,
    pub tipo_servicio: String,
    pub cod_servicio: String,
    pub cod_servicio_sistema: String,
    pub descripcion_servicio: String,
    pub cantidad: String,
    pub valor_unitario: String,
    pub valor_total: String,
    pub valor_cuota_moderadora: String,
    pub valor_neto: String,
}

/// AH - hospitalization record (22 fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AhRecord {
    pub num_factura: String,
    pub cod_prestador: String,
    pub tipo_documento: String,
    pub num_documento: String,
    pub via_ingreso: String,
    pub fecha_ingreso: String,
    pub hora_ingreso: String,
    pub num_autorizacion: String,
    pub causa_externa: String,
    pub diagnostico_ingreso: String,
    pub diagnostico_egreso: String,
    pub diagnostico_relacionado1: String,
    pub diagnostico_relacionado2: String,
    pub diagnostico_relacionado3: String,
    pub diagnostico_complicacion: String,
    pub estado_salida: String,
    pub diagnostico_muerte: String,
    pub fecha_egreso: String,
    pub hora_egreso: String,
    pub valor_hospitalizacion: String,
    pub valor_cuota_moderadora: String,
    pub valor_neto: String,
}

/// AM - medication record (16 fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmRecord {
    pub num_factura: String,
    pub cod_prestador: String,
    pub tipo_documento: String,
    pub num_documento: String,
    pub num_autorizacion: String,
    pub cod_medicamento: String,
    pub tipo_medicamento: String,
    pub nombre_medicamento: String,
    pub forma_farmaceutica: String,
    pub concentracion: String,
    pub unidad_medida: String,
    pub numero_unidades: String,
    pub valor_unitario: String,
    pub valor_total: String,
    pub valor_cuota_moderadora: String,
    pub valor_neto: String,
}

/// AN - newborn record (14 fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnRecord {
    pub num_factura: String,
    pub cod_prestador: String,
    pub tipo_documento_madre: String,
    pub num_documento_madre: String,
    pub fecha_nacimiento: String,
    pub hora_nacimiento: String,
    pub edad_gestacional: String,
    pub control_prenatal: String,
    pub sexo: String,
    pub peso: String,
    pub diagnostico_recien_nacido: String,
    pub diagnostico_relacionado: String,
    pub complicacion: String,
    pub tipo_parto: String,
}

/// CT - control record (10 fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtRecord {
    pub cod_prestador: String,
    pub fecha_remision: String,
    pub num_registros_af: String,
    pub num_registros_us: String,
    pub num_registros_ac: String,
    pub num_registros_ap: String,
    pub num_registros_at: String,
    pub num_registros_ah: String,
    pub num_registros_am: String,
    pub num_registros_an: String,
}

/// A parsed record of any RIPS file kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileRecord {
    Af(AfRecord),
    Us(UsRecord),
    Ac(AcRecord),
    Ap(ApRecord),
    At(AtRecord),
    Ah(AhRecord),
    Am(AmRecord),
    An(AnRecord),
    Ct(CtRecord),
}

impl FileRecord {
    /// The file kind this record belongs to.
    pub const fn kind(&self) -> FileKind {
        match self {
            Self::Af(_) => FileKind::Af,
            Self::Us(_) => FileKind::Us,
            Self::Ac(_) => FileKind::Ac,
            Self::Ap(_) => FileKind::Ap,
            Self::At(_) => FileKind::At,
            Self::Ah(_) => FileKind::Ah,
            Self::Am(_) => FileKind::Am,
            Self::An(_) => FileKind::An,
            Self::Ct(_) => FileKind::Ct,
        }
    }

    /// Invoice number for kinds that carry one.
    pub fn num_factura(&self) -> Option<&str> {
        match self {
            Self::Af(r) => Some(&r.num_factura),
            Self::Ac(r) => Some(&r.num_factura),
            Self::Ap(r) => Some(&r.num_factura),
            Self::At(r) => Some(&r.num_factura),
            Self::Ah(r) => Some(&r.num_factura),
            Self::Am(r) => Some(&r.num_factura),
            Self::An(r) => Some(&r.num_factura),
            Self::Us(_) | Self::Ct(_) => None,
        }
    }

    /// Patient identity (document type, document number) for dependent kinds.
    pub fn patient_identity(&self) -> Option<(&str, &str)> {
        match self {
            Self::Us(r) => Some((&r.tipo_documento, &r.num_documento)),
            Self::Ac(r) => Some((&r.tipo_documento, &r.num_documento)),
            Self::Ap(r) => Some((&r.tipo_documento, &r.num_documento)),
            Self::At(r) => Some((&r.tipo_documento, &r.num_documento)),
            Self::Ah(r) => Some((&r.tipo_documento, &r.num_documento)),
            Self::Am(r) => Some((&r.tipo_documento, &r.num_documento)),
            Self::An(r) => Some((&r.tipo_documento_madre, &r.num_documento_madre)),
            Self::Af(_) | Self::Ct(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_codes_roundtrip() {
        for kind in FileKind::all() {
            assert_eq!(kind.code().parse::<FileKind>().unwrap(), *kind);
        }
        assert!("XX".parse::<FileKind>().is_err());
    }

    #[test]
    fn test_file_kind_field_counts() {
        assert_eq!(FileKind::Af.field_count(), 17);
        assert_eq!(FileKind::Us.field_count(), 15);
        assert_eq!(FileKind::Ac.field_count(), 22);
        assert_eq!(FileKind::At.field_count(), 14);
        assert_eq!(FileKind::Ct.field_count(), 10);
    }

    #[test]
    fn test_dependent_kinds() {
        assert!(FileKind::Ac.is_dependent());
        assert!(FileKind::Am.is_dependent());
        assert!(!FileKind::Af.is_dependent());
        assert!(!FileKind::Us.is_dependent());
        assert!(!FileKind::Ct.is_dependent());
    }
}
