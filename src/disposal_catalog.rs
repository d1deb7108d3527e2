use crate::error::Error;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

pub const BACKGROUND_CLASS: &str = "Background";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(token: &str) -> Option<Self> {
        let hex = token.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        Color::from_hex(&token).ok_or_else(|| format!("invalid color token '{}'", token))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisposalEntry {
    pub bin_label: String,
    pub color: Color,
    pub instruction: String,
    pub icon: String,
}

impl DisposalEntry {
    fn new(bin_label: &str, color: Color, instruction: &str, icon: &str) -> Self {
        Self {
            bin_label: bin_label.to_string(),
            color,
            instruction: instruction.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Class name to disposal guidance. Always holds a Background entry, which
/// every unknown class name resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct DisposalCatalog {
    entries: HashMap<String, DisposalEntry>,
}

impl DisposalCatalog {
    pub fn new(entries: HashMap<String, DisposalEntry>) -> Result<Self, Error> {
        if !entries.contains_key(BACKGROUND_CLASS) {
            return Err(Error::Catalog(format!(
                "missing required '{}' entry",
                BACKGROUND_CLASS
            )));
        }
        Ok(Self { entries })
    }

    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let entries: HashMap<String, DisposalEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn lookup(&self, class_name: &str) -> &DisposalEntry {
        self.entries
            .get(class_name)
            .unwrap_or_else(|| self.background())
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.entries.contains_key(class_name)
    }

    pub fn background(&self) -> &DisposalEntry {
        // checked in `new`
        &self.entries[BACKGROUND_CLASS]
    }

    pub fn missing_classes<S: AsRef<str>>(&self, class_names: &[S]) -> Vec<String> {
        class_names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !self.contains(name))
            .map(|name| name.to_string())
            .collect()
    }

    pub fn validate<S: AsRef<str>>(&self, class_names: &[S]) -> Result<(), Error> {
        let missing = self.missing_classes(class_names);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Catalog(format!(
                "no disposal entry for model classes: {}",
                missing.join(", ")
            )))
        }
    }
}

impl Default for DisposalCatalog {
    fn default() -> Self {
        let entries = [
            (
                "Papel",
                DisposalEntry::new(
                    "LIXEIRA AZUL",
                    Color::rgb(0x3f, 0x51, 0xb5),
                    "Papel e Papelão. Mantenha limpo e seco.",
                    "📦",
                ),
            ),
            (
                "Plastico",
                DisposalEntry::new(
                    "LIXEIRA VERMELHA",
                    Color::rgb(0xff, 0x63, 0x47),
                    "Plástico. Lave antes de descartar.",
                    "🥤",
                ),
            ),
            (
                "Metal",
                DisposalEntry::new(
                    "LIXEIRA AMARELA",
                    Color::rgb(0xff, 0xd7, 0x00),
                    "Metal. Amasse latas para economizar espaço.",
                    "🥫",
                ),
            ),
            (
                "Vidro",
                DisposalEntry::new(
                    "LIXEIRA VERDE",
                    Color::rgb(0x00, 0xa6, 0x5a),
                    "Vidro. Descarte com segurança.",
                    "🍾",
                ),
            ),
            (
                "Organico",
                DisposalEntry::new(
                    "LIXEIRA COMUM",
                    Color::rgb(0x44, 0x44, 0x44),
                    "Lixo Comum/Rejeito. Não Reciclável.",
                    "🗑️",
                ),
            ),
            (
                BACKGROUND_CLASS,
                DisposalEntry::new(
                    "NENHUM OBJETO",
                    Color::rgb(0xcc, 0xcc, 0xcc),
                    "Aproxime o objeto para classificação.",
                    "🔍",
                ),
            ),
        ];

        Self {
            entries: entries
                .into_iter()
                .map(|(name, entry)| (name.to_string(), entry))
                .collect(),
        }
    }
}
