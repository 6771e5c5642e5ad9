//! Raw-to-typed record conversion.
//!
//! This is the only place raw field vectors become typed records. A field
//! count mismatch is a structural defect of the line; the caller reports it
//! and moves on to the next line.

use rips_model::{
    AcRecord, AfRecord, AhRecord, AmRecord, AnRecord, ApRecord, AtRecord, CtRecord, FileKind,
    FileRecord, UsRecord,
};

/// Field count mismatch for one delimited line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} fields, found {found}")]
pub struct FieldCountMismatch {
    pub expected: usize,
    pub found: usize,
}

/// Split a delimited line into its fields. RIPS flat files are plain
/// comma-delimited without quoting or escapes.
pub fn split_line(line: &str) -> Vec<String> {
    line.trim_end_matches(['\r', '\n'])
        .split(',')
        .map(str::to_string)
        .collect()
}

/// Build the typed record for `kind` from an exactly-counted field vector.
pub fn parse_record(kind: FileKind, fields: &[String]) -> Result<FileRecord, FieldCountMismatch> {
    let expected = kind.field_count();
    if fields.len() != expected {
        return Err(FieldCountMismatch {
            expected,
            found: fields.len(),
        });
    }

    let f = |index: usize| fields[index].clone();
    let record = match kind {
        FileKind::Af => FileRecord::Af(AfRecord {
            cod_prestador: f(0),
            nombre_prestador: f(1),
            tipo_documento_prestador: f(2),
            num_documento_prestador: f(3),
            num_factura: f(4),
            fecha_expedicion: f(5),
            fecha_inicio: f(6),
            fecha_final: f(7),
            cod_entidad_administradora: f(8),
            nombre_entidad_administradora: f(9),
            num_contrato: f(10),
            plan_beneficios: f(11),
            num_poliza: f(12),
            valor_comision: f(13),
            num_cuotas_moderadoras: f(14),
            valor_comision_cm: f(15),
            valor_neto: f(16),
        }),
        FileKind::Us => FileRecord::Us(UsRecord {
            tipo_documento: f(0),
            num_documento: f(1),
            cod_entidad_administradora: f(2),
            tipo_usuario: f(3),
            primer_apellido: f(4),
            segundo_apellido: f(5),
            primer_nombre: f(6),
            segundo_nombre: f(7),
            edad: f(8),
            unidad_medida_edad: f(9),
            sexo: f(10),
            cod_departamento: f(11),
            cod_municipio: f(12),
            zona_residencial: f(13),
            num_autorizacion: f(14),
        }),
        FileKind::Ac => FileRecord::Ac(AcRecord {
            num_factura: f(0),
            cod_prestador: f(1),
            tipo_documento: f(2),
            num_documento: f(3),
            fecha_consulta: f(4),
            num_autorizacion: f(5),
            cod_consulta: f(6),
            cod_consulta_sistema: f(7),
            descripcion_consulta: f(8),
            finalidad_consulta: f(9),
            causa_externa: f(10),
            diagnostico_principal: f(11),
            diagnostico_relacionado1: f(12),
            diagnostico_relacionado2: f(13),
            diagnostico_relacionado3: f(14),
            tipo_diagnostico_principal: f(15),
            valor_consulta: f(16),
            valor_cuota_moderadora: f(17),
            valor_neto: f(18),
            edad: f(19),
            unidad_medida_edad: f(20),
            sexo: f(21),
        }),
        FileKind::Ap => FileRecord::Ap(ApRecord {
            num_factura: f(0),
            cod_prestador: f(1),
            tipo_documento: f(2),
            num_documento: f(3),
            fecha_procedimiento: f(4),
            num_autorizacion: f(5),
            cod_procedimiento: f(6),
            cod_procedimiento_sistema: f(7),
            descripcion_procedimiento: f(8),
            ambito_procedimiento: f(9),
            finalidad_procedimiento: f(10),
            personal_atiende: f(11),
            diagnostico_principal: f(12),
            diagnostico_relacionado: f(13),
            complicacion: f(14),
            forma_realizacion: f(15),
            valor_procedimiento: f(16),
            valor_cuota_moderadora: f(17),
            valor_neto: f(18),
            edad: f(19),
            unidad_medida_edad: f(20),
            sexo: f(21),
        }),
        FileKind::At => FileRecord::At(AtRecord {
            num_factura: f(0),
            cod_prestador: f(1),
            tipo_documento: f(2),
            num_documento: f(3),
            num_autorizacion: f(4),
            tipo_servicio: f(5),
            cod_servicio: f(6),
            cod_servicio_sistema: f(7),
            descripcion_servicio: f(8),
            cantidad: f(9),
            valor_unitario: f(10),
            valor_total: f(11),
            valor_cuota_moderadora: f(12),
            valor_neto: f(13),
        }),
        FileKind::Ah => FileRecord::Ah(AhRecord {
            num_factura: f(0),
            cod_prestador: f(1),
            tipo_documento: f(2),
            num_documento: f(3),
            via_ingreso: f(4),
            fecha_ingreso: f(5),
            hora_ingreso: f(6),
            num_autorizacion: f(7),
            causa_externa: f(8),
            diagnostico_ingreso: f(9),
            diagnostico_egreso: f(10),
            diagnostico_relacionado1: f(11),
            diagnostico_relacionado2: f(12),
            diagnostico_relacionado3: f(13),
            diagnostico_complicacion: f(14),
            estado_salida: f(15),
            diagnostico_muerte: f(16),
            fecha_egreso: f(17),
            hora_egreso: f(18),
            valor_hospitalizacion: f(19),
            valor_cuota_moderadora: f(20),
            valor_neto: f(21),
        }),
        FileKind::Am => FileRecord::Am(AmRecord {
            num_factura: f(0),
            cod_prestador: f(1),
            tipo_documento: f(2),
            num_documento: f(3),
            num_autorizacion: f(4),
            cod_medicamento: f(5),
            tipo_medicamento: f(6),
            nombre_medicamento: f(7),
            forma_farmaceutica: f(8),
            concentracion: f(9),
            unidad_medida: f(10),
            numero_unidades: f(11),
            valor_unitario: f(12),
            valor_total: f(13),
            valor_cuota_moderadora: f(14),
            valor_neto: f(15),
        }),
        FileKind::An => FileRecord::An(AnRecord {
            num_factura: f(0),
            cod_prestador: f(1),
            tipo_documento_madre: f(2),
            num_documento_madre: f(3),
            fecha_nacimiento: f(4),
            hora_nacimiento: f(5),
            edad_gestacional: f(6),
            control_prenatal: f(7),
            sexo: f(8),
            peso: f(9),
            diagnostico_recien_nacido: f(10),
            diagnostico_relacionado: f(11),
            complicacion: f(12),
            tipo_parto: f(13),
        }),
        FileKind::Ct => FileRecord::Ct(CtRecord {
            cod_prestador: f(0),
            fecha_remision: f(1),
            num_registros_af: f(2),
            num_registros_us: f(3),
            num_registros_ac: f(4),
            num_registros_ap: f(5),
            num_registros_at: f(6),
            num_registros_ah: f(7),
            num_registros_am: f(8),
            num_registros_an: f(9),
        }),
    };
    Ok(record)
}
