//! Renders the analysis tables for terminal output.

use std::collections::HashSet;

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};

use predict::{
    cfg::Terminal,
    ll1::{Analysis, Entry},
};

/// Sorted, comma separated rendering of a terminal set
fn set_to_string(set: &HashSet<Terminal>) -> String {
    let mut members: Vec<String> = set.iter().map(ToString::to_string).collect();
    members.sort();
    format!("{{{}}}", members.join(", "))
}

/// Build a table skeleton with the shared preset
fn table_skeleton() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Build the FIRST/FOLLOW table, one row per non-terminal in order of first
/// appearance
pub fn first_follow_table(analysis: &Analysis) -> Table {
    let mut table = table_skeleton();

    table.add_row(vec![
        Cell::new("Non-Terminal").add_attribute(Attribute::Bold),
        Cell::new("First").add_attribute(Attribute::Bold),
        Cell::new("Follow").add_attribute(Attribute::Bold),
    ]);

    for nonterminal in analysis.grammar().nonterminals() {
        table.add_row(vec![
            Cell::new(format!("<{}>", nonterminal)),
            Cell::new(set_to_string(&analysis.firsts()[nonterminal])),
            Cell::new(set_to_string(&analysis.follows()[nonterminal])),
        ]);
    }

    table
}

/// Build the rule table: one row per non-terminal, one column per literal
/// terminal plus the input-end sentinel. Cells carry the production indices
/// predicting the row's non-terminal, or the literal `synch` for recovery
/// points.
pub fn rule_table(analysis: &Analysis) -> Table {
    let mut table = table_skeleton();

    let mut terminals = analysis.grammar().terminals();
    terminals.push(Terminal::End);

    let mut header = vec![Cell::new("Non-Terminal").add_attribute(Attribute::Bold)];
    header.extend(
        terminals
            .iter()
            .map(|t| Cell::new(t.to_string()).add_attribute(Attribute::Bold)),
    );
    table.add_row(header);

    for nonterminal in analysis.grammar().nonterminals() {
        let mut row = vec![Cell::new(format!("<{}>", nonterminal))];
        for terminal in &terminals {
            let content = match analysis.entry(nonterminal, *terminal) {
                Some(Entry::Rules(ids)) => ids
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
                Some(Entry::Synch) => "synch".to_string(),
                None => String::new(),
            };
            row.push(Cell::new(content));
        }
        table.add_row(row);
    }

    table
}

#[cfg(test)]
mod test {
    use super::*;

    use predict::cfg::{Grammar, Symbol};

    /// S -> a S | b, enough to exercise both tables
    fn analysis() -> Analysis {
        let mut grammar = Grammar::new();
        grammar.push(
            "S".to_string(),
            vec![
                Symbol::Terminal(Terminal::Literal('a')),
                Symbol::Nonterminal("S".to_string()),
            ],
        );
        grammar.push(
            "S".to_string(),
            vec![Symbol::Terminal(Terminal::Literal('b'))],
        );
        Analysis::new(grammar).unwrap()
    }

    #[test]
    fn rule_table_shows_indices_and_synch() {
        let rendered = rule_table(&analysis()).to_string();

        assert!(rendered.contains("<S>"));
        assert!(rendered.contains('0'));
        assert!(rendered.contains('1'));
        assert!(rendered.contains("synch"));
    }

    #[test]
    fn first_follow_table_lists_every_nonterminal() {
        let rendered = first_follow_table(&analysis()).to_string();

        assert!(rendered.contains("<S>"));
        assert!(rendered.contains("{a, b}"));
        assert!(rendered.contains("{$}"));
    }
}
