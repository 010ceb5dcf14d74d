use liga_terminal::team_display::{strip_parenthetical, TeamDisplay, TeamDisplayTable};

#[test]
fn resolve_finds_exact_names() {
    let table = TeamDisplayTable::league_defaults();
    assert_eq!(table.resolve("SAN JOSE OBRERO").abbr, "SJO");
    assert_eq!(table.resolve(" FERROCARRIL ").abbr, "FER");
}

#[test]
fn resolve_strips_parenthetical_qualifiers() {
    let table = TeamDisplayTable::league_defaults();
    assert_eq!(table.resolve("INDEPENDIENTE (VILLA DEL ROSARIO)").abbr, "IND");
    assert_eq!(table.resolve("SANTA ANA (SUR)").abbr, "STA");
}

#[test]
fn resolve_never_fails() {
    let table = TeamDisplayTable::league_defaults();
    let unknown = table.resolve("CLUB INVENTADO");
    assert_eq!(unknown.abbr, "???");
    assert_eq!(unknown.shield, "/shields/default.png");
    assert_eq!(table.resolve(""), table.default_entry());
}

#[test]
fn strip_parenthetical_removes_the_outermost_span() {
    assert_eq!(strip_parenthetical("EQUIPO (CIUDAD)"), "EQUIPO");
    assert_eq!(strip_parenthetical("EQUIPO (A) (B)"), "EQUIPO");
    assert_eq!(strip_parenthetical("  EQUIPO  "), "EQUIPO");
    // unbalanced pairs come back trimmed but whole
    assert_eq!(strip_parenthetical("EQUIPO (ROTO"), "EQUIPO (ROTO");
    assert_eq!(strip_parenthetical("EQUIPO) ("), "EQUIPO) (");
}

#[test]
fn custom_tables_resolve_through_the_same_rules() {
    let table = TeamDisplayTable::from_pairs(
        &[("JUVENTUD", "JUV", "/shields/juventud.png")],
        TeamDisplay {
            abbr: "N/D".to_string(),
            shield: "/shields/nd.png".to_string(),
        },
    );
    assert_eq!(table.resolve("JUVENTUD (NORTE)").abbr, "JUV");
    assert_eq!(table.resolve("OTRO").abbr, "N/D");
}
