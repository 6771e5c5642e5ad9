//! Per-kind record rules.
//!
//! One rule set per RIPS file kind, built from the atomic validators in
//! [`crate::fields`]. Every violation becomes a `ValidationError` value in
//! the `FieldFormat` category; nothing here ever aborts a run.

use chrono::NaiveDate;

use rips_model::{
    AcRecord, AfRecord, AhRecord, AmRecord, AnRecord, ApRecord, AtRecord, CtRecord, ErrorCategory,
    FileRecord, UsRecord, ValidationError,
};

use crate::fields;

const RES_2275: &str = "Res. 2275/2023";
const RES_2275_3280: &str = "Res. 2275/2023 y 3280/2018";

/// Apply the field rules for the record's kind.
pub fn validate_record(
    record: &FileRecord,
    file_name: &str,
    line_number: usize,
    reference_date: NaiveDate,
) -> Vec<ValidationError> {
    let mut sink = RuleSink::new(file_name, line_number);
    match record {
        FileRecord::Af(af) => validate_af(af, reference_date, &mut sink),
        FileRecord::Us(us) => validate_us(us, &mut sink),
        FileRecord::Ac(ac) => validate_ac(ac, reference_date, &mut sink),
        FileRecord::Ap(ap) => validate_ap(ap, reference_date, &mut sink),
        FileRecord::At(at) => validate_at(at, &mut sink),
        FileRecord::Ah(ah) => validate_ah(ah, reference_date, &mut sink),
        FileRecord::Am(am) => validate_am(am, &mut sink),
        FileRecord::An(an) => validate_an(an, reference_date, &mut sink),
        FileRecord::Ct(ct) => validate_ct(ct, reference_date, &mut sink),
    }
    sink.into_errors()
}

/// Append-only collector threaded through the rule functions, so ordering
/// stays exactly the rule-application order.
struct RuleSink<'a> {
    file_name: &'a str,
    line_number: usize,
    errors: Vec<ValidationError>,
}

impl<'a> RuleSink<'a> {
    fn new(file_name: &'a str, line_number: usize) -> Self {
        Self {
            file_name,
            line_number,
            errors: Vec::new(),
        }
    }

    fn push(&mut self, field: &str, message: Option<String>, rule: &str, fix: &str) {
        if let Some(message) = message {
            self.errors.push(ValidationError::new(
                self.file_name,
                self.line_number,
                field,
                message,
                rule,
                fix,
                ErrorCategory::FieldFormat,
            ));
        }
    }

    fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

fn validate_af(record: &AfRecord, reference_date: NaiveDate, sink: &mut RuleSink) {
    sink.push(
        "cod_prestador",
        fields::check_max_length(&record.cod_prestador, "cod_prestador", 12, true),
        RES_2275,
        "Verificar código habilitación del prestador",
    );
    sink.push(
        "cod_prestador",
        fields::check_integer(&record.cod_prestador, "cod_prestador", true, None, None),
        RES_2275,
        "El código debe ser numérico",
    );
    sink.push(
        "nombre_prestador",
        fields::check_max_length(&record.nombre_prestador, "nombre_prestador", 60, true),
        RES_2275,
        "Reducir longitud del nombre",
    );
    sink.push(
        "tipo_documento_prestador",
        fields::check_document_type(
            &record.tipo_documento_prestador,
            "tipo_documento_prestador",
        ),
        RES_2275,
        "Usar: CC, NI, CE, etc.",
    );
    sink.push(
        "num_documento_prestador",
        fields::check_max_length(
            &record.num_documento_prestador,
            "num_documento_prestador",
            20,
            true,
        ),
        RES_2275,
        "Verificar número de documento",
    );
    sink.push(
        "num_factura",
        fields::check_max_length(&record.num_factura, "num_factura", 20, true),
        RES_2275,
        "Verificar número de factura",
    );
    sink.push(
        "fecha_expedicion",
        fields::check_date(&record.fecha_expedicion, "fecha_expedicion", true, reference_date)
            .err(),
        RES_2275,
        "Formato: DD/MM/YYYY",
    );
    sink.push(
        "fecha_inicio",
        fields::check_date(&record.fecha_inicio, "fecha_inicio", true, reference_date).err(),
        RES_2275,
        "Formato: DD/MM/YYYY",
    );
    sink.push(
        "fecha_final",
        fields::check_date(&record.fecha_final, "fecha_final", true, reference_date).err(),
        RES_2275,
        "Formato: DD/MM/YYYY",
    );
    sink.push(
        "fecha_inicio/fecha_final",
        fields::check_date_range(
            &record.fecha_inicio,
            &record.fecha_final,
            "fecha_inicio",
            "fecha_final",
            reference_date,
        ),
        RES_2275,
        "Fecha inicio debe ser <= fecha final",
    );
    sink.push(
        "cod_entidad_administradora",
        fields::check_max_length(
            &record.cod_entidad_administradora,
            "cod_entidad_administradora",
            6,
            true,
        ),
        RES_2275,
        "Verificar código EPS/entidad",
    );
    sink.push(
        "nombre_entidad_administradora",
        fields::check_max_length(
            &record.nombre_entidad_administradora,
            "nombre_entidad_administradora",
            60,
            true,
        ),
        RES_2275,
        "Reducir longitud del nombre",
    );
    sink.push(
        "valor_neto",
        fields::check_decimal(&record.valor_neto, "valor_neto", true, Some(0.0), None),
        RES_2275,
        "Valor debe ser numérico y >= 0",
    );
}

fn validate_us(record: &UsRecord, sink: &mut RuleSink) {
    sink.push(
        "tipo_documento",
        fields::check_document_type(&record.tipo_documento, "tipo_documento"),
        RES_2275,
        "Usar: CC, TI, RC, CE, PA, etc.",
    );
    sink.push(
        "num_documento",
        fields::check_max_length(&record.num_documento, "num_documento", 20, true),
        RES_2275,
        "Verificar número de identificación",
    );
    sink.push(
        "cod_entidad_administradora",
        fields::check_max_length(
            &record.cod_entidad_administradora,
            "cod_entidad_administradora",
            6,
            true,
        ),
        RES_2275,
        "Verificar código EPS",
    );
    sink.push(
        "tipo_usuario",
        fields::check_user_type(&record.tipo_usuario, "tipo_usuario"),
        RES_2275,
        "1=Contributivo, 2=Subsidiado, 3=Vinculado, 4=Particular",
    );
    sink.push(
        "primer_apellido",
        fields::check_max_length(&record.primer_apellido, "primer_apellido", 60, true),
        RES_2275,
        "Verificar primer apellido",
    );
    sink.push(
        "primer_nombre",
        fields::check_max_length(&record.primer_nombre, "primer_nombre", 60, true),
        RES_2275,
        "Verificar primer nombre",
    );
    sink.push(
        "edad",
        fields::check_integer(&record.edad, "edad", true, Some(0), Some(150)),
        RES_2275,
        "Edad debe ser entre 0 y 150",
    );
    sink.push(
        "unidad_medida_edad",
        fields::check_age_unit(&record.unidad_medida_edad, "unidad_medida_edad"),
        RES_2275,
        "1=años, 2=meses, 3=días",
    );
    sink.push(
        "sexo",
        fields::check_sex(&record.sexo, "sexo"),
        RES_2275,
        "Debe ser M o F",
    );
    sink.push(
        "cod_departamento",
        fields::check_max_length(&record.cod_departamento, "cod_departamento", 2, true),
        RES_2275,
        "Código DANE de 2 dígitos",
    );
    sink.push(
        "cod_municipio",
        fields::check_max_length(&record.cod_municipio, "cod_municipio", 3, true),
        RES_2275,
        "Código DANE de 3 dígitos",
    );
    sink.push(
        "zona_residencial",
        fields::check_zone(&record.zona_residencial, "zona_residencial"),
        RES_2275,
        "U=Urbana, R=Rural",
    );
}

fn validate_ac(record: &AcRecord, reference_date: NaiveDate, sink: &mut RuleSink) {
    sink.push(
        "num_factura",
        fields::check_max_length(&record.num_factura, "num_factura", 20, true),
        RES_2275,
        "Debe corresponder al AF",
    );
    sink.push(
        "cod_prestador",
        fields::check_max_length(&record.cod_prestador, "cod_prestador", 12, true),
        RES_2275,
        "Código habilitación del prestador",
    );
    sink.push(
        "tipo_documento",
        fields::check_document_type(&record.tipo_documento, "tipo_documento"),
        RES_2275,
        "Debe existir en US",
    );
    sink.push(
        "num_documento",
        fields::check_max_length(&record.num_documento, "num_documento", 20, true),
        RES_2275,
        "Debe existir en US",
    );
    sink.push(
        "fecha_consulta",
        fields::check_date(&record.fecha_consulta, "fecha_consulta", true, reference_date).err(),
        RES_2275,
        "Formato DD/MM/YYYY",
    );
    sink.push(
        "cod_consulta",
        fields::check_cups_format(&record.cod_consulta, "cod_consulta", true),
        RES_2275,
        "Código CUPS de 6 dígitos",
    );
    sink.push(
        "finalidad_consulta",
        fields::check_integer(&record.finalidad_consulta, "finalidad_consulta", true, None, None),
        RES_2275,
        "Código de finalidad según tabla",
    );
    sink.push(
        "causa_externa",
        fields::check_integer(&record.causa_externa, "causa_externa", true, None, None),
        RES_2275,
        "Código de causa externa según tabla",
    );
    sink.push(
        "diagnostico_principal",
        fields::check_cie10_format(&record.diagnostico_principal, "diagnostico_principal", true),
        RES_2275_3280,
        "Código CIE10 válido (ej: A001, Z000)",
    );
    for (value, field) in [
        (&record.diagnostico_relacionado1, "diagnostico_relacionado1"),
        (&record.diagnostico_relacionado2, "diagnostico_relacionado2"),
        (&record.diagnostico_relacionado3, "diagnostico_relacionado3"),
    ] {
        if !fields::is_empty(value) {
            sink.push(
                field,
                fields::check_cie10_format(value, field, false),
                RES_2275_3280,
                "Código CIE10 válido o vacío",
            );
        }
    }
    sink.push(
        "tipo_diagnostico_principal",
        fields::check_integer(
            &record.tipo_diagnostico_principal,
            "tipo_diagnostico_principal",
            true,
            None,
            None,
        ),
        RES_2275,
        "1=Impresión diagnóstica, 2=Confirmado nuevo, 3=Confirmado repetido",
    );
    sink.push(
        "valor_consulta",
        fields::check_decimal(&record.valor_consulta, "valor_consulta", true, Some(0.0), None),
        RES_2275,
        "Valor >= 0",
    );
    sink.push(
        "valor_neto",
        fields::check_decimal(&record.valor_neto, "valor_neto", true, Some(0.0), None),
        RES_2275,
        "Valor >= 0",
    );
    sink.push(
        "edad",
        fields::check_integer(&record.edad, "edad", true, Some(0), Some(150)),
        RES_2275,
        "Edad 0-150",
    );
    sink.push(
        "unidad_medida_edad",
        fields::check_age_unit(&record.unidad_medida_edad, "unidad_medida_edad"),
        RES_2275,
        "1=años, 2=meses, 3=días",
    );
    sink.push(
        "sexo",
        fields::check_sex(&record.sexo, "sexo"),
        RES_2275,
        "M o F",
    );
}

fn validate_ap(record: &ApRecord, reference_date: NaiveDate, sink: &mut RuleSink) {
    sink.push(
        "num_factura",
        fields::check_max_length(&record.num_factura, "num_factura", 20, true),
        RES_2275,
        "Debe corresponder al AF",
    );
    sink.push(
        "cod_prestador",
        fields::check_max_length(&record.cod_prestador, "cod_prestador", 12, true),
        RES_2275,
        "Código habilitación",
    );
    sink.push(
        "tipo_documento",
        fields::check_document_type(&record.tipo_documento, "tipo_documento"),
        RES_2275,
        "Debe existir en US",
    );
    sink.push(
        "num_documento",
        fields::check_max_length(&record.num_documento, "num_documento", 20, true),
        RES_2275,
        "Debe existir en US",
    );
    sink.push(
        "fecha_procedimiento",
        fields::check_date(
            &record.fecha_procedimiento,
            "fecha_procedimiento",
            true,
            reference_date,
        )
        .err(),
        RES_2275,
        "Formato DD/MM/YYYY",
    );
    sink.push(
        "cod_procedimiento",
        fields::check_cups_format(&record.cod_procedimiento, "cod_procedimiento", true),
        RES_2275,
        "Código CUPS de 6 dígitos",
    );
    sink.push(
        "diagnostico_principal",
        fields::check_cie10_format(&record.diagnostico_principal, "diagnostico_principal", true),
        RES_2275_3280,
        "Código CIE10 válido",
    );
    if !fields::is_empty(&record.diagnostico_relacionado) {
        sink.push(
            "diagnostico_relacionado",
            fields::check_cie10_format(
                &record.diagnostico_relacionado,
                "diagnostico_relacionado",
                false,
            ),
            RES_2275_3280,
            "Código CIE10 válido o vacío",
        );
    }
    if !fields::is_empty(&record.complicacion) {
        sink.push(
            "complicacion",
            fields::check_cie10_format(&record.complicacion, "complicacion", false),
            RES_2275_3280,
            "Código CIE10 válido o vacío",
        );
    }
    sink.push(
        "valor_procedimiento",
        fields::check_decimal(
            &record.valor_procedimiento,
            "valor_procedimiento",
            true,
            Some(0.0),
            None,
        ),
        RES_2275,
        "Valor >= 0",
    );
    sink.push(
        "valor_neto",
        fields::check_decimal(&record.valor_neto, "valor_neto", true, Some(0.0), None),
        RES_2275,
        "Valor >= 0",
    );
    sink.push(
        "edad",
        fields::check_integer(&record.edad, "edad", true, Some(0), Some(150)),
        RES_2275,
        "Edad 0-150",
    );
    sink.push(
        "unidad_medida_edad",
        fields::check_age_unit(&record.unidad_medida_edad, "unidad_medida_edad"),
        RES_2275,
        "1=años, 2=meses, 3=días",
    );
    sink.push(
        "sexo",
        fields::check_sex(&record.sexo, "sexo"),
        RES_2275,
        "M o F",
    );
}

fn validate_at(record: &AtRecord, sink: &mut RuleSink) {
    sink.push(
        "num_factura",
        fields::check_max_length(&record.num_factura, "num_factura", 20, true),
        RES_2275,
        "Debe corresponder al AF",
    );
    sink.push(
        "cod_prestador",
        fields::check_max_length(&record.cod_prestador, "cod_prestador", 12, true),
        RES_2275,
        "Código habilitación",
    );
    sink.push(
        "tipo_documento",
        fields::check_document_type(&record.tipo_documento, "tipo_documento"),
        RES_2275,
        "Debe existir en US",
    );
    sink.push(
        "num_documento",
        fields::check_max_length(&record.num_documento, "num_documento", 20, true),
        RES_2275,
        "Debe existir en US",
    );
    sink.push(
        "cod_servicio",
        fields::check_cups_format(&record.cod_servicio, "cod_servicio", true),
        RES_2275,
        "Código CUPS de 6 dígitos",
    );
    sink.push(
        "cantidad",
        fields::check_decimal(&record.cantidad, "cantidad", true, Some(0.0), None),
        RES_2275,
        "Cantidad > 0",
    );
    sink.push(
        "valor_unitario",
        fields::check_decimal(&record.valor_unitario, "valor_unitario", true, Some(0.0), None),
        RES_2275,
        "Valor >= 0",
    );
    sink.push(
        "valor_total",
        fields::check_decimal(&record.valor_total, "valor_total", true, Some(0.0), None),
        RES_2275,
        "Valor >= 0",
    );
    sink.push(
        "valor_neto",
        fields::check_decimal(&record.valor_neto, "valor_neto", true, Some(0.0), None),
        RES_2275,
        "Valor >= 0",
    );
}

fn validate_ah(record: &AhRecord, reference_date: NaiveDate, sink: &mut RuleSink) {
    sink.push(
        "num_factura",
        fields::check_max_length(&record.num_factura, "num_factura", 20, true),
        RES_2275,
        "Debe corresponder al AF",
    );
    sink.push(
        "tipo_documento",
        fields::check_document_type(&record.tipo_documento, "tipo_documento"),
        RES_2275,
        "Debe existir en US",
    );
    sink.push(
        "fecha_ingreso",
        fields::check_date(&record.fecha_ingreso, "fecha_ingreso", true, reference_date).err(),
        RES_2275,
        "Formato DD/MM/YYYY",
    );
    sink.push(
        "diagnostico_ingreso",
        fields::check_cie10_format(&record.diagnostico_ingreso, "diagnostico_ingreso", true),
        RES_2275_3280,
        "Código CIE10 válido",
    );
    sink.push(
        "diagnostico_egreso",
        fields::check_cie10_format(&record.diagnostico_egreso, "diagnostico_egreso", true),
        RES_2275_3280,
        "Código CIE10 válido",
    );
    sink.push(
        "fecha_egreso",
        fields::check_date(&record.fecha_egreso, "fecha_egreso", true, reference_date).err(),
        RES_2275,
        "Formato DD/MM/YYYY",
    );
    sink.push(
        "fecha_ingreso/fecha_egreso",
        fields::check_date_range(
            &record.fecha_ingreso,
            &record.fecha_egreso,
            "fecha_ingreso",
            "fecha_egreso",
            reference_date,
        ),
        RES_2275,
        "Fecha ingreso <= fecha egreso",
    );
    sink.push(
        "valor_hospitalizacion",
        fields::check_decimal(
            &record.valor_hospitalizacion,
            "valor_hospitalizacion",
            true,
            Some(0.0),
            None,
        ),
        RES_2275,
        "Valor >= 0",
    );
    sink.push(
        "valor_neto",
        fields::check_decimal(&record.valor_neto, "valor_neto", true, Some(0.0), None),
        RES_2275,
        "Valor >= 0",
    );
}

fn validate_am(record: &AmRecord, sink: &mut RuleSink) {
    sink.push(
        "num_factura",
        fields::check_max_length(&record.num_factura, "num_factura", 20, true),
        RES_2275,
        "Debe corresponder al AF",
    );
    sink.push(
        "cod_prestador",
        fields::check_max_length(&record.cod_prestador, "cod_prestador", 12, true),
        RES_2275,
        "Código habilitación",
    );
    sink.push(
        "tipo_documento",
        fields::check_document_type(&record.tipo_documento, "tipo_documento"),
        RES_2275,
        "Debe existir en US",
    );
    sink.push(
        "num_documento",
        fields::check_max_length(&record.num_documento, "num_documento", 20, true),
        RES_2275,
        "Debe existir en US",
    );
    sink.push(
        "cod_medicamento",
        fields::check_max_length(&record.cod_medicamento, "cod_medicamento", 20, true),
        RES_2275,
        "Código CUM del medicamento",
    );
    sink.push(
        "nombre_medicamento",
        fields::check_max_length(&record.nombre_medicamento, "nombre_medicamento", 60, true),
        RES_2275,
        "Nombre genérico del medicamento",
    );
    sink.push(
        "numero_unidades",
        fields::check_decimal(&record.numero_unidades, "numero_unidades", true, Some(0.0), None),
        RES_2275,
        "Unidades > 0",
    );
    sink.push(
        "valor_unitario",
        fields::check_decimal(&record.valor_unitario, "valor_unitario", true, Some(0.0), None),
        RES_2275,
        "Valor >= 0",
    );
    sink.push(
        "valor_total",
        fields::check_decimal(&record.valor_total, "valor_total", true, Some(0.0), None),
        RES_2275,
        "Valor >= 0",
    );
    sink.push(
        "valor_neto",
        fields::check_decimal(&record.valor_neto, "valor_neto", true, Some(0.0), None),
        RES_2275,
        "Valor >= 0",
    );
}

fn validate_an(record: &AnRecord, reference_date: NaiveDate, sink: &mut RuleSink) {
    sink.push(
        "num_factura",
        fields::check_max_length(&record.num_factura, "num_factura", 20, true),
        RES_2275,
        "Debe corresponder al AF",
    );
    sink.push(
        "tipo_documento_madre",
        fields::check_document_type(&record.tipo_documento_madre, "tipo_documento_madre"),
        RES_2275,
        "Documento de la madre, debe existir en US",
    );
    sink.push(
        "num_documento_madre",
        fields::check_max_length(&record.num_documento_madre, "num_documento_madre", 20, true),
        RES_2275,
        "Debe existir en US",
    );
    sink.push(
        "fecha_nacimiento",
        fields::check_date(&record.fecha_nacimiento, "fecha_nacimiento", true, reference_date)
            .err(),
        RES_2275,
        "Formato DD/MM/YYYY",
    );
    sink.push(
        "sexo",
        fields::check_sex(&record.sexo, "sexo"),
        RES_2275,
        "M o F",
    );
    sink.push(
        "peso",
        fields::check_decimal(&record.peso, "peso", true, Some(0.0), None),
        RES_2275,
        "Peso al nacer en gramos",
    );
    sink.push(
        "diagnostico_recien_nacido",
        fields::check_cie10_format(
            &record.diagnostico_recien_nacido,
            "diagnostico_recien_nacido",
            true,
        ),
        RES_2275_3280,
        "Código CIE10 válido",
    );
    sink.push(
        "tipo_parto",
        fields::check_integer(&record.tipo_parto, "tipo_parto", true, None, None),
        RES_2275,
        "Tipo de parto según tabla",
    );
}

fn validate_ct(record: &CtRecord, reference_date: NaiveDate, sink: &mut RuleSink) {
    sink.push(
        "cod_prestador",
        fields::check_max_length(&record.cod_prestador, "cod_prestador", 12, true),
        RES_2275,
        "Código habilitación del prestador",
    );
    sink.push(
        "fecha_remision",
        fields::check_date(&record.fecha_remision, "fecha_remision", true, reference_date).err(),
        RES_2275,
        "Formato DD/MM/YYYY",
    );
    for (value, field) in [
        (&record.num_registros_af, "num_registros_af"),
        (&record.num_registros_us, "num_registros_us"),
        (&record.num_registros_ac, "num_registros_ac"),
        (&record.num_registros_ap, "num_registros_ap"),
        (&record.num_registros_at, "num_registros_at"),
        (&record.num_registros_ah, "num_registros_ah"),
        (&record.num_registros_am, "num_registros_am"),
        (&record.num_registros_an, "num_registros_an"),
    ] {
        sink.push(
            field,
            fields::check_integer(value, field, true, Some(0), None),
            RES_2275,
            "Conteo de registros >= 0",
        );
    }
}
