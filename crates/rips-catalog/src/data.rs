//! Embedded CIE10 reference data.
//!
//! The curated code table covers the diagnoses most frequently billed in
//! Colombian RIPS extracts. It is deliberately partial: the chapter table
//! below backs the lenient fallback for codes outside the curated set, and
//! `Cie10Catalog::extend_from_csv` can load a fuller table at run time.

/// CIE10 chapter descriptions keyed by the code's first letter.
pub(crate) const CHAPTERS: &[(char, &str)] = &[
    ('A', "Enfermedades infecciosas y parasitarias (A00-B99)"),
    ('B', "Enfermedades infecciosas y parasitarias (A00-B99)"),
    ('C', "Neoplasias (C00-D48)"),
    ('D', "Enfermedades de la sangre y neoplasias (C00-D89)"),
    ('E', "Enfermedades endocrinas, nutricionales y metabólicas (E00-E90)"),
    ('F', "Trastornos mentales y del comportamiento (F00-F99)"),
    ('G', "Enfermedades del sistema nervioso (G00-G99)"),
    ('H', "Enfermedades del ojo y sus anexos / del oído (H00-H95)"),
    ('I', "Enfermedades del sistema circulatorio (I00-I99)"),
    ('J', "Enfermedades del sistema respiratorio (J00-J99)"),
    ('K', "Enfermedades del sistema digestivo (K00-K93)"),
    ('L', "Enfermedades de la piel y tejido subcutáneo (L00-L99)"),
    ('M', "Enfermedades del sistema osteomuscular (M00-M99)"),
    ('N', "Enfermedades del sistema genitourinario (N00-N99)"),
    ('O', "Embarazo, parto y puerperio (O00-O99)"),
    ('P', "Afecciones del período perinatal (P00-P96)"),
    ('Q', "Malformaciones congénitas (Q00-Q99)"),
    ('R', "Síntomas y signos no clasificados (R00-R99)"),
    ('S', "Traumatismos (S00-T98)"),
    ('T', "Traumatismos y envenenamientos (S00-T98)"),
    ('V', "Causas externas de morbilidad y mortalidad (V01-Y98)"),
    ('W', "Causas externas de morbilidad y mortalidad (V01-Y98)"),
    ('X', "Causas externas de morbilidad y mortalidad (V01-Y98)"),
    ('Y', "Causas externas de morbilidad y mortalidad (V01-Y98)"),
    ('Z', "Factores que influyen en el estado de salud (Z00-Z99)"),
];

/// Curated code table: CIE-10 2019 (OMS), most common codes in Colombian
/// RIPS billing.
pub(crate) const CODES: &[(&str, &str)] = &[
    ("A00", "Cólera"),
    ("A000", "Cólera debido a Vibrio cholerae 01, biotipo cholerae"),
    ("A001", "Cólera debido a Vibrio cholerae 01, biotipo El Tor"),
    ("A009", "Cólera, no especificado"),
    ("A01", "Fiebres tifoidea y paratifoidea"),
    ("A02", "Otras infecciones debidas a Salmonella"),
    ("A06", "Amebiasis"),
    ("A062", "Colitis amebiana"),
    ("A08", "Infecciones intestinales debidas a virus"),
    ("A085", "Otras infecciones intestinales virales especificadas"),
    ("A09", "Diarrea y gastroenteritis de presunto origen infeccioso"),
    ("A09X", "Diarrea y gastroenteritis de presunto origen infeccioso"),
    ("B33", "Otras enfermedades virales"),
    ("B338", "Otras enfermedades virales especificadas"),
    ("B34", "Infección viral de sitio no especificado"),
    ("B348", "Otras infecciones virales de sitio no especificado"),
    ("B57", "Enfermedad de Chagas"),
    ("B572", "Enfermedad de Chagas (crónica) que afecta el corazón"),
    ("B86X", "Escabiosis"),
    ("D24X", "Neoplasia benigna de la mama"),
    ("D50", "Anemias por deficiencia de hierro"),
    ("D509", "Anemia por deficiencia de hierro, sin otra especificación"),
    ("E11", "Diabetes mellitus no insulinodependiente"),
    ("E119", "Diabetes mellitus no insulinodependiente, sin mención de complicación"),
    ("E28", "Disfunción ovárica"),
    ("E282", "Síndrome de ovarios poliquísticos"),
    ("E66", "Obesidad"),
    ("E660", "Obesidad debida a exceso de calorías"),
    ("E78", "Trastornos del metabolismo de las lipoproteínas"),
    ("E784", "Otras hiperlipidemias"),
    ("E785", "Hiperlipidemia, no especificada"),
    ("G20X", "Enfermedad de Parkinson"),
    ("G43", "Migraña"),
    ("G439", "Migraña, no especificada"),
    ("G47", "Trastornos del sueño"),
    ("G470", "Trastornos de inicio y mantenimiento del sueño [insomnio]"),
    ("G59", "Mononeuropatías"),
    ("G590", "Mononeuropatía diabética"),
    ("H10", "Conjuntivitis"),
    ("H109", "Conjuntivitis, no especificada"),
    ("H40", "Glaucoma"),
    ("H409", "Glaucoma, no especificado"),
    ("H52", "Trastornos de la acomodación y de la refracción"),
    ("H526", "Otros trastornos de la refracción"),
    ("I10X", "Hipertensión esencial (primaria)"),
    ("I25", "Enfermedad isquémica crónica del corazón"),
    ("I49", "Otras arritmias cardíacas"),
    ("I498", "Otras arritmias cardíacas especificadas"),
    ("I50", "Insuficiencia cardíaca"),
    ("I509", "Insuficiencia cardíaca, no especificada"),
    ("I86", "Várices de otros sitios"),
    ("I868", "Várices de otros sitios especificados"),
    ("J00X", "Rinofaringitis aguda [resfriado común]"),
    ("J02", "Faringitis aguda"),
    ("J029", "Faringitis aguda, no especificada"),
    ("J03", "Amigdalitis aguda"),
    ("J039", "Amigdalitis aguda, no especificada"),
    ("J06", "Infecciones agudas de las vías respiratorias superiores"),
    ("J069", "Infección aguda de las vías respiratorias superiores, no especificada"),
    ("J18", "Neumonía, organismo no especificado"),
    ("J189", "Neumonía, no especificada"),
    ("J46X", "Estado asmático"),
    ("K02", "Caries dental"),
    ("K021", "Caries de la dentina"),
    ("K04", "Enfermedades de la pulpa y de los tejidos periapicales"),
    ("K046", "Absceso periapical con fístula"),
    ("K05", "Gingivitis y enfermedades periodontales"),
    ("K050", "Gingivitis aguda"),
    ("K12", "Estomatitis y lesiones afines"),
    ("K120", "Estomatitis aftosa recurrente"),
    ("K29", "Gastritis y duodenitis"),
    ("K297", "Gastritis, no especificada"),
    ("K30X", "Dispepsia"),
    ("L03", "Celulitis"),
    ("L030", "Celulitis de dedos de la mano y del pie"),
    ("L20", "Dermatitis atópica"),
    ("L209", "Dermatitis atópica, no especificada"),
    ("L50", "Urticaria"),
    ("L509", "Urticaria, no especificada"),
    ("M25", "Otros trastornos articulares"),
    ("M255", "Dolor en articulación"),
    ("M54", "Dorsalgia"),
    ("M545", "Lumbago no especificado"),
    ("M79", "Otros trastornos de los tejidos blandos"),
    ("M796", "Dolor en miembro"),
    ("N39", "Otros trastornos del sistema urinario"),
    ("N390", "Infección de vías urinarias, sitio no especificado"),
    ("N76", "Otras afecciones inflamatorias de la vagina y de la vulva"),
    ("N92", "Menstruación excesiva, frecuente e irregular"),
    ("N920", "Menstruación excesiva y frecuente con ciclo regular"),
    ("O23", "Infecciones de las vías genitourinarias en el embarazo"),
    ("R00", "Anormalidades del latido cardíaco"),
    ("R000", "Taquicardia, no especificada"),
    ("R04", "Hemorragia de las vías respiratorias"),
    ("R042", "Hemoptisis"),
    ("R10", "Dolor abdominal y pélvico"),
    ("R103", "Dolor localizado en otras partes inferiores del abdomen"),
    ("R104", "Otros dolores abdominales y los no especificados"),
    ("R11X", "Náusea y vómito"),
    ("R42X", "Mareo y desvanecimiento"),
    ("R50", "Fiebre de origen desconocido"),
    ("R509", "Fiebre, no especificada"),
    ("R51X", "Cefalea"),
    ("R52", "Dolor, no clasificado en otra parte"),
    ("R68", "Otros síntomas y signos generales"),
    ("R688", "Otros síntomas y signos generales especificados"),
    (
        "Z00",
        "Examen general e investigación de personas sin quejas o sin diagnóstico informado",
    ),
    ("Z000", "Examen médico general"),
    (
        "Z01",
        "Otros exámenes especiales e investigaciones en personas sin quejas o sin diagnóstico informado",
    ),
    ("Z012", "Examen odontológico"),
    ("Z018", "Otros exámenes especiales especificados"),
    ("Z12", "Examen especial de pesquisa de neoplasias"),
    ("Z125", "Examen especial de pesquisa de otras neoplasias"),
    ("Z23", "Necesidad de inmunización contra enfermedad bacteriana única"),
    ("Z238", "Necesidad de inmunización contra otras enfermedades bacterianas únicas"),
    ("Z30", "Atención para la anticoncepción"),
    ("Z308", "Otras atenciones especificadas para la anticoncepción"),
    ("Z34", "Supervisión de embarazo normal"),
    ("Z348", "Supervisión de otro embarazo normal"),
    ("Z35", "Supervisión de embarazo de alto riesgo"),
    ("Z359", "Supervisión de embarazo de alto riesgo, sin otra especificación"),
    ("Z95", "Presencia de implantes e injertos cardíacos y vasculares"),
    ("Z955", "Presencia de implante e injerto de angioplastia coronaria"),
];
