//! Lexicon and runtime configuration for tattoo extraction.
//!
//! The category word lists, body-part vocabulary, and laterality terms are
//! configuration data, not code: [`TattooLexicon`] is serde-loadable so a
//! deployment can swap vocabularies without rebuilding. The defaults carry
//! the production Spanish lists.

use serde::{Deserialize, Serialize};

use crate::error::TattooError;

/// How a fragment matching several category word lists is labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStrategy {
    /// Keep every matching category (information-preserving default).
    #[default]
    KeepAll,
    /// Stop at the first matching category, in lexicon order.
    FirstMatch,
}

/// One category and the words that trigger it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    pub terms: Vec<String>,
}

/// The fixed vocabularies driving splitting and tagging. Matching is
/// case- and accent-insensitive, so each spelling needs to appear once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TattooLexicon {
    /// Category word lists, in priority order (relevant for
    /// [`CategoryStrategy::FirstMatch`]).
    pub categories: Vec<CategoryEntry>,
    /// Body-part names scanned for location tags.
    pub body_parts: Vec<String>,
    /// Laterality terms looked up near a body-part hit.
    pub laterality: Vec<String>,
    /// Fragments equal to one of these are dropped.
    pub filler_words: Vec<String>,
    /// Leading noise stripped from fragments.
    pub strip_prefixes: Vec<String>,
    /// Dashed labels that suppress dash-splitting of a narrative.
    pub protected_labels: Vec<String>,
}

fn entry(name: &str, terms: &[&str]) -> CategoryEntry {
    CategoryEntry {
        name: name.to_string(),
        terms: terms.iter().map(|t| t.to_string()).collect(),
    }
}

impl Default for TattooLexicon {
    fn default() -> Self {
        Self {
            categories: vec![
                entry(
                    "Figura Humana",
                    &[
                        "rostro", "figura", "hombre", "mujer", "persona", "cuerpo", "ojos",
                        "silueta", "humana", "humano", "cráneo", "calavera", "busto",
                        "caricatura", "personaje",
                    ],
                ),
                entry(
                    "Letras-Números",
                    &[
                        "letra", "letras", "números", "leyenda", "leyendas", "palabras",
                        "palabra", "texto", "nombre", "frase", "cursiva", "cursivas",
                        "cursivo", "manuscrita", "mayúsculas", "tipografía", "tipologia",
                        "script", "romanos",
                    ],
                ),
                entry(
                    "Simbolos",
                    &[
                        "símbolo", "símbolos", "cruz", "rojo", "negro", "machete", "corazón",
                        "corazones", "estrella", "estrellas", "infinito", "triángulo",
                        "cruz cristiana", "círculo", "geométrico", "geométricos", "guadaña",
                        "ancla", "flecha", "espada", "daga", "signo", "trébol", "diamante",
                        "asterisco", "asteriscos", "pirámide", "playboy", "atrapasueños",
                        "brújula", "mandala", "yin", "yang", "ying", "calendario", "egipcio",
                        "baraja", "carta", "cartas", "reloj", "bandera", "logotipo", "logo",
                        "alegoría",
                    ],
                ),
                entry(
                    "Animales",
                    &[
                        "tigre", "león", "zorro", "lobo", "perro", "gallo", "pez", "pájaro",
                        "conejo", "águila", "serpiente", "dragón", "mariposa", "pantera",
                        "gato", "felino", "búho", "ave", "aves", "cobra", "alacrán",
                        "escorpión", "araña", "pavo", "paloma", "colibrí", "tortuga",
                        "ballena", "delfín", "murciélago", "halcón", "leopardo", "jaguar",
                        "rinoceronte", "elefante", "tiburón", "orca",
                    ],
                ),
                entry(
                    "Religiosos",
                    &[
                        "santa muerte", "cruz cristiana", "anj", "horus", "dios", "ángel",
                        "ángeles", "santo", "santos", "religión", "virgen", "jesús",
                        "jesucristo", "cristo", "maría", "guadalupe", "san", "judas",
                        "sagrado", "oración", "rosario", "biblia", "santísima", "demonios",
                        "demonio", "diablo", "infierno", "cielo", "paraíso", "altar",
                        "templo", "iglesia", "católica", "buda", "zen", "mandala", "yoga",
                        "meditación", "karma", "chakra", "om", "símbolo religioso",
                    ],
                ),
                entry(
                    "Nombre",
                    &[
                        "jose", "alberto", "juan", "adriana", "carlos", "maria", "luis",
                        "ana", "david", "eduardo", "martha", "victor", "tadeo", "alejandra",
                        "santiago", "alejandro", "laura", "raul", "lopez", "silvia", "jesus",
                    ],
                ),
                entry(
                    "Otros",
                    &[
                        "irreconocible", "indeterminado", "abstracto", "floral", "combinado",
                        "fantasía", "manga", "cuerno", "flores", "planta", "hojas", "ramas",
                        "árbol", "paisaje", "naturaleza", "sol", "luna", "nube", "mar",
                        "océano", "montaña", "fuego", "llamas", "agua", "tierra", "viento",
                        "rayo", "trueno", "arcoíris", "galaxia", "universo", "planeta",
                        "cometa", "espacio", "cosmos", "alien", "ovni", "robot", "futurista",
                        "retro", "vintage", "moderno", "clásico", "arte", "dibujo",
                        "pintura", "escultura", "grafiti", "mural", "cartel", "poster",
                        "emblema", "insignia", "medalla", "trofeo", "copa",
                    ],
                ),
            ],
            body_parts: [
                "ROSTRO", "CUERPO", "BRAZO", "HOMBRO", "MANO", "PIERNA", "TORSO",
                "ESCAPULA", "CABEZA", "CLAVICULA", "PECTORAL", "FLANCO", "ANTEBRAZO",
                "OJO", "CARA", "CUELLO", "ESPALDA", "EXTREMIDAD", "MUSLO", "RODILLA",
                "DORSO", "ABDOMEN", "TORAX", "MUÑECA", "OREJA", "PECHO", "COSTADO",
                "PANTORRILLA", "DORSAL", "CRANEO", "PULGAR", "DEDOS", "INDICE",
                "MEÑIQUE", "TOBILLO", "CADERA", "LENGUA", "NARIZ", "CEJA", "BUSTO",
                "CODO", "FALANGE", "LUMBAR", "TALON", "PLANTA", "NUCA", "OMBLIGO",
                "PALMA", "GLUTEO", "ENTREPIERNA", "INGLE", "ESPINILLA", "LABIO",
                "MEJILLA", "SENO", "HUESO", "TRAPECIO", "INTERCOSTAL", "AXILA", "PIE",
                "EMPEINE", "DEDO GORDO", "NUDILLO", "COSTILLAS",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            laterality: ["DERECHO", "DERECHA", "IZQUIERDO", "IZQUIERDA"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            filler_words: ["TATUAJE", "LOCALIZADO"].iter().map(|s| s.to_string()).collect(),
            strip_prefixes: ["TATUAJE ", "EN ", "- "].iter().map(|s| s.to_string()).collect(),
            protected_labels: ["LETRAS-NUMEROS"].iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Runtime configuration for tattoo extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TattooConfig {
    pub lexicon: TattooLexicon,
    /// Fragments shorter than this many characters are dropped.
    pub min_fragment_chars: usize,
    pub category_strategy: CategoryStrategy,
    /// Characters inspected before a body-part hit for a laterality term.
    pub laterality_window_before: usize,
    /// Characters inspected after the start of a body-part hit.
    pub laterality_window_after: usize,
}

impl Default for TattooConfig {
    fn default() -> Self {
        Self {
            lexicon: TattooLexicon::default(),
            min_fragment_chars: 4,
            category_strategy: CategoryStrategy::default(),
            laterality_window_before: 10,
            laterality_window_after: 25,
        }
    }
}

impl TattooConfig {
    /// Start-up validation; intended to run before any narrative is split.
    pub fn validate(&self) -> Result<(), TattooError> {
        if self.min_fragment_chars == 0 {
            return Err(TattooError::InvalidConfig(
                "min_fragment_chars must be >= 1".into(),
            ));
        }
        if self.lexicon.body_parts.is_empty() {
            return Err(TattooError::InvalidConfig(
                "lexicon must list at least one body part".into(),
            ));
        }
        if self.lexicon.categories.is_empty() {
            return Err(TattooError::InvalidConfig(
                "lexicon must list at least one category".into(),
            ));
        }
        if self
            .lexicon
            .categories
            .iter()
            .any(|c| c.name.trim().is_empty() || c.terms.is_empty())
        {
            return Err(TattooError::InvalidConfig(
                "every category needs a name and a non-empty term list".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TattooConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_category_rejected() {
        let mut cfg = TattooConfig::default();
        cfg.lexicon.categories.push(CategoryEntry {
            name: "Vacia".into(),
            terms: vec![],
        });
        assert!(matches!(cfg.validate(), Err(TattooError::InvalidConfig(_))));
    }

    #[test]
    fn lexicon_roundtrips_through_serde() {
        let lexicon = TattooLexicon::default();
        let json = serde_json::to_string(&lexicon).expect("serialize");
        let back: TattooLexicon = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(lexicon, back);
    }
}
