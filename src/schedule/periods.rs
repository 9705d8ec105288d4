//! Tablas de periodos (교시): código -> hora de inicio + duración.
//!
//! Conviven dos sistemas incompatibles según el documento de origen, por eso
//! la tabla se elige explícitamente con [`PeriodDialect`] y nunca es global.

use crate::models::ClockTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Sistema de periodos que usa una fuente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodDialect {
    /// Export tabular: números en grilla de 30 min desde 09:00, letras de 50 min
    #[default]
    Uniform,
    /// Booklet PDF: números de 50 min desde 08:00, letras de 75 min
    Mixed,
}

impl FromStr for PeriodDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uniform" | "uniform-50" => Ok(PeriodDialect::Uniform),
            "mixed" | "mixed-75" => Ok(PeriodDialect::Mixed),
            other => Err(format!("dialecto de periodos desconocido: '{}'", other)),
        }
    }
}

impl fmt::Display for PeriodDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodDialect::Uniform => f.write_str("uniform"),
            PeriodDialect::Mixed => f.write_str("mixed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSpec {
    pub start: ClockTime,
    pub duration: u16,
}

impl PeriodSpec {
    fn new(hour: u16, minute: u16, duration: u16) -> Self {
        PeriodSpec { start: ClockTime::from_hm(hour, minute), duration }
    }

    pub fn end(&self) -> ClockTime {
        self.start.plus_minutes(self.duration)
    }
}

/// Posición de un código dentro de su serie: (serie, índice). Los números y
/// las letras son series distintas y nunca se encadenan entre sí.
type Rank = (u8, u16);

/// Tabla inmutable de periodos, construida una vez por ejecución
#[derive(Debug, Clone)]
pub struct PeriodTable {
    dialect: PeriodDialect,
    specs: HashMap<String, PeriodSpec>,
    ranks: HashMap<String, Rank>,
}

impl PeriodTable {
    pub fn new(dialect: PeriodDialect) -> Self {
        let mut specs = HashMap::new();
        let mut ranks = HashMap::new();
        match dialect {
            PeriodDialect::Uniform => {
                // 1..22: bloques de 30 minutos desde las 09:00
                for n in 1u16..=22 {
                    let minutes = 9 * 60 + (n - 1) * 30;
                    specs.insert(n.to_string(), PeriodSpec::new(minutes / 60, minutes % 60, 30));
                    ranks.insert(n.to_string(), (0, n));
                }
                // A..K: 50 minutos a la hora en punto, sin bloque a las 12:00
                let hours = [9u16, 10, 11, 13, 14, 15, 16, 17, 18, 19, 20];
                for (i, (letter, hour)) in ('A'..='K').zip(hours).enumerate() {
                    specs.insert(letter.to_string(), PeriodSpec::new(hour, 0, 50));
                    ranks.insert(letter.to_string(), (1, i as u16));
                }
            }
            PeriodDialect::Mixed => {
                // 0..13: 50 minutos a la hora en punto desde las 08:00
                for n in 0u16..=13 {
                    specs.insert(n.to_string(), PeriodSpec::new(8 + n, 0, 50));
                    ranks.insert(n.to_string(), (0, n));
                }
                let blocks = [
                    ('Z', 8, 10),
                    ('A', 9, 30),
                    ('B', 11, 0),
                    ('C', 13, 30),
                    ('D', 15, 0),
                    ('E', 16, 30),
                    ('F', 18, 0),
                    ('G', 19, 30),
                    ('H', 21, 0),
                ];
                for (i, (letter, hour, minute)) in blocks.into_iter().enumerate() {
                    specs.insert(letter.to_string(), PeriodSpec::new(hour, minute, 75));
                    ranks.insert(letter.to_string(), (1, i as u16));
                }
            }
        }
        PeriodTable { dialect, specs, ranks }
    }

    pub fn dialect(&self) -> PeriodDialect {
        self.dialect
    }

    /// Busca un código atómico (insensible a mayúsculas)
    pub fn lookup(&self, code: &str) -> Option<PeriodSpec> {
        self.specs.get(&code.trim().to_uppercase()).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.lookup(code).is_some()
    }

    /// Resuelve un código de un solo periodo a (inicio, fin)
    pub fn resolve(&self, code: &str) -> Option<(ClockTime, ClockTime)> {
        self.lookup(code).map(|spec| (spec.start, spec.end()))
    }

    /// Resuelve un código posiblemente compuesto ("67", "AB", "1011") como un
    /// bloque contiguo: inicio del primer periodo y fin del último. Si algún
    /// periodo atómico no existe, el código completo falla.
    pub fn resolve_span(&self, code: &str) -> Option<(ClockTime, ClockTime)> {
        if let Some(span) = self.resolve(code) {
            return Some(span);
        }
        let atoms = self.split_atoms(code)?;
        let first = self.lookup(atoms.first()?)?;
        let last = self.lookup(atoms.last()?)?;
        Some((first.start, last.end()))
    }

    /// Parte un código compuesto en periodos atómicos ("123" -> 1, 2, 3;
    /// "1011" -> 10, 11). Se busca una partición cuyos periodos sean
    /// consecutivos en la tabla; si no existe, una estrictamente creciente
    /// ("135"). Sin ninguna de las dos, el código no se puede resolver.
    pub fn split_atoms(&self, code: &str) -> Option<Vec<String>> {
        let chars: Vec<char> = code.trim().to_uppercase().chars().collect();
        if chars.is_empty() {
            return None;
        }
        let mut atoms = Vec::new();
        if self.search_atoms(&chars, None, true, &mut atoms)
            || self.search_atoms(&chars, None, false, &mut atoms)
        {
            Some(atoms)
        } else {
            None
        }
    }

    // Búsqueda con retroceso: primero átomos de un carácter, luego de dos.
    fn search_atoms(&self, rest: &[char], prev: Option<Rank>, contiguous: bool, atoms: &mut Vec<String>) -> bool {
        if rest.is_empty() {
            return true;
        }
        for len in 1..=2.min(rest.len()) {
            let atom: String = rest[..len].iter().collect();
            let Some(&rank) = self.ranks.get(&atom) else {
                continue;
            };
            let follows = match prev {
                None => true,
                Some((series, index)) if contiguous => rank == (series, index + 1),
                Some((series, index)) => rank.0 == series && rank.1 > index,
            };
            if !follows {
                continue;
            }
            atoms.push(atom);
            if self.search_atoms(&rest[len..], Some(rank), contiguous, atoms) {
                return true;
            }
            atoms.pop();
        }
        false
    }
}
