//! CSV ingest for both registries.
//!
//! Row-level problems (a malformed record, a blank identifier) are logged
//! and skipped; the load only fails when the file itself is unreadable or
//! yields zero usable records.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::types::{Body, BodyRow, MissingPerson, MissingPersonRow};

/// Loads the missing-person registry from a CSV file. Records whose
/// localization status marks the person as found alive are excluded.
pub fn load_missing_from_path(
    path: impl AsRef<Path>,
    cfg: &RegistryConfig,
) -> Result<Vec<MissingPerson>, RegistryError> {
    let file = File::open(path.as_ref())?;
    load_missing_from_reader(file, cfg)
}

/// Reader-based variant of [`load_missing_from_path`].
pub fn load_missing_from_reader(
    reader: impl Read,
    cfg: &RegistryConfig,
) -> Result<Vec<MissingPerson>, RegistryError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut records = Vec::new();
    let mut skipped_rows = 0usize;
    let mut skipped_alive = 0usize;

    for (line, result) in csv_reader.deserialize::<MissingPersonRow>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(err) => {
                warn!(line, %err, "skipping unreadable missing-person row");
                skipped_rows += 1;
                continue;
            }
        };
        match MissingPerson::from_row(row, cfg) {
            Some(person) if person.located_alive(cfg) => {
                debug!(id = %person.id, "excluding record: person located alive");
                skipped_alive += 1;
            }
            Some(person) => {
                if person.event_date.is_none() {
                    debug!(id = %person.id, "missing-person record has unknown event date");
                }
                records.push(person);
            }
            None => {
                warn!(line, "skipping missing-person row without identifier");
                skipped_rows += 1;
            }
        }
    }

    if records.is_empty() {
        return Err(RegistryError::EmptyRegistry {
            registry: "missing-persons",
        });
    }
    info!(
        loaded = records.len(),
        skipped_rows, skipped_alive, "missing-person registry loaded"
    );
    Ok(records)
}

/// Loads the body-intake registry from a CSV file.
pub fn load_bodies_from_path(
    path: impl AsRef<Path>,
    cfg: &RegistryConfig,
) -> Result<Vec<Body>, RegistryError> {
    let file = File::open(path.as_ref())?;
    load_bodies_from_reader(file, cfg)
}

/// Reader-based variant of [`load_bodies_from_path`].
pub fn load_bodies_from_reader(
    reader: impl Read,
    cfg: &RegistryConfig,
) -> Result<Vec<Body>, RegistryError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut records = Vec::new();
    let mut skipped_rows = 0usize;

    for (line, result) in csv_reader.deserialize::<BodyRow>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(err) => {
                warn!(line, %err, "skipping unreadable body row");
                skipped_rows += 1;
                continue;
            }
        };
        match Body::from_row(row, cfg) {
            Some(body) => {
                if body.intake_date.is_none() {
                    debug!(id = %body.id, "body record has unknown intake date");
                }
                records.push(body);
            }
            None => {
                warn!(line, "skipping body row without identifier");
                skipped_rows += 1;
            }
        }
    }

    if records.is_empty() {
        return Err(RegistryError::EmptyRegistry { registry: "bodies" });
    }
    info!(loaded = records.len(), skipped_rows, "body registry loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AgeValue;
    use std::io::Write;

    const MISSING_CSV: &str = "\
id_cedula_busqueda,sexo,edad_momento_desaparicion,nombre_completo,fecha_desaparicion,municipio,condicion_localizacion,Tatuajes
M-001,HOMBRE,34,JUAN PEREZ LOPEZ,2019-05-04,ZAPOPAN,SIN VIDA,TATUAJE EN BRAZO DERECHO
M-002,MUJER,27,ANA TORRES,2020-01-15,GUADALAJARA,CON VIDA,No presenta
M-003,HOMBRE,,PEDRO RAMIREZ,no-date,TONALA,,
";

    const BODY_CSV: &str = "\
ID,Sexo,Edad,Probable_nombre,Fecha_Ingreso,Delegacion_IJCF,Tatuajes
B-100,HOMBRE,66-70 años,PFSI-00123,2019-08-20,IJCF ZAPOPAN NORTE,No presenta
B-101,MUJER,30,MARIA GOMEZ,2020-02-02,IJCF GUADALAJARA,\"1.- ROSA EN HOMBRO IZQUIERDO\"
";

    #[test]
    fn missing_csv_ingest_honors_aliases_and_alive_filter() {
        let cfg = RegistryConfig::default();
        let records =
            load_missing_from_reader(MISSING_CSV.as_bytes(), &cfg).expect("load succeeds");
        // M-002 excluded (located alive), the others kept.
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "M-001");
        assert_eq!(records[0].municipality, "ZAPOPAN");
        assert_eq!(records[0].age, AgeValue::Point(34));
        assert!(records[0].tattoo_narrative.is_some());
        assert_eq!(records[1].id, "M-003");
        assert_eq!(records[1].event_date, None);
        assert_eq!(records[1].age, AgeValue::Unknown);
    }

    #[test]
    fn body_csv_ingest_parses_range_and_sentinels() {
        let cfg = RegistryConfig::default();
        let records = load_bodies_from_reader(BODY_CSV.as_bytes(), &cfg).expect("load succeeds");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].age, AgeValue::Range { min: 66, max: 70 });
        assert_eq!(records[0].tattoo_narrative, None);
        assert_eq!(records[1].jurisdiction, "IJCF GUADALAJARA");
        assert!(records[1]
            .tattoo_narrative
            .as_deref()
            .is_some_and(|n| n.contains("ROSA")));
    }

    #[test]
    fn file_backed_load_roundtrip() {
        let cfg = RegistryConfig::default();
        let mut tmp = tempfile::NamedTempFile::new().expect("temp file");
        tmp.write_all(BODY_CSV.as_bytes()).expect("write csv");
        let records = load_bodies_from_path(tmp.path(), &cfg).expect("load succeeds");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn empty_registry_fails_fast() {
        let cfg = RegistryConfig::default();
        let result = load_bodies_from_reader("ID,Sexo\n".as_bytes(), &cfg);
        assert!(matches!(
            result,
            Err(RegistryError::EmptyRegistry { registry: "bodies" })
        ));
    }
}
