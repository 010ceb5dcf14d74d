use std::collections::HashMap;

/// Presentation attributes for one club: short code and crest reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDisplay {
    pub abbr: String,
    pub shield: String,
}

/// Lookup table from raw team names to display attributes. Owned by the app
/// state and passed where needed; there is no global table.
#[derive(Debug, Clone)]
pub struct TeamDisplayTable {
    entries: HashMap<String, TeamDisplay>,
    default: TeamDisplay,
}

impl TeamDisplayTable {
    pub fn from_pairs(pairs: &[(&str, &str, &str)], default: TeamDisplay) -> Self {
        let entries = pairs
            .iter()
            .map(|(name, abbr, shield)| {
                (
                    (*name).to_string(),
                    TeamDisplay {
                        abbr: (*abbr).to_string(),
                        shield: (*shield).to_string(),
                    },
                )
            })
            .collect();
        Self { entries, default }
    }

    /// The league's known clubs. Names arrive from the API both with and
    /// without a parenthetical qualifier, so the table keys are the bare
    /// names and `resolve` strips qualifiers before the second lookup.
    pub fn league_defaults() -> Self {
        Self::from_pairs(
            &[
                ("TIRO FEDERAL", "TIR", "/shields/tiro_federal.png"),
                ("LA FLORIDA", "FLO", "/shields/la_florida.png"),
                ("VELEZ SARSFIELD", "VEL", "/shields/vel.png"),
                ("CHACARITA", "CHA", "/shields/chacarita.png"),
                ("MOCORETA", "MOC", "/shields/mocoreta.png"),
                ("SAN JOSE OBRERO", "SJO", "/shields/san_jose_obrero.png"),
                ("SAN FRANCISCO", "SFR", "/shields/san_francisco.png"),
                ("INDEPENDIENTE", "IND", "/shields/independiente.png"),
                ("1° DE MAYO", "1DM", "/shields/primero_de_mayo.png"),
                ("SANTA ROSA", "SR", "/shields/santa_rosa.png"),
                ("FERROCARRIL", "FER", "/shields/ferrocarril.png"),
                ("SANTA ANA", "STA", "/shields/santa_ana.png"),
                ("SAN CLEMENTE", "SCL", "/shields/san_clemente.png"),
                ("LOS CONQUISTADORES", "LCQ", "/shields/los_conquistadores.png"),
            ],
            TeamDisplay {
                abbr: "???".to_string(),
                shield: "/shields/default.png".to_string(),
            },
        )
    }

    /// Total lookup: exact name, then the name with any parenthetical
    /// qualifier stripped, then the default entry. Never fails.
    pub fn resolve(&self, raw_name: &str) -> &TeamDisplay {
        if let Some(found) = self.entries.get(raw_name.trim()) {
            return found;
        }
        let stripped = strip_parenthetical(raw_name);
        self.entries.get(&stripped).unwrap_or(&self.default)
    }

    pub fn default_entry(&self) -> &TeamDisplay {
        &self.default
    }
}

impl Default for TeamDisplayTable {
    fn default() -> Self {
        Self::league_defaults()
    }
}

/// `"TEAM (CITY)"` -> `"TEAM"`. Removes the span from the first `(` to the
/// last `)` along with surrounding whitespace; input without a balanced pair
/// comes back trimmed but otherwise unchanged.
pub fn strip_parenthetical(name: &str) -> String {
    let (Some(open), Some(close)) = (name.find('('), name.rfind(')')) else {
        return name.trim().to_string();
    };
    if close < open {
        return name.trim().to_string();
    }
    let mut out = String::with_capacity(name.len());
    out.push_str(name[..open].trim_end());
    out.push_str(name[close + 1..].trim_start());
    out.trim().to_string()
}
