use tabled::{settings::Style, Table, Tabled};

use crate::entity::{Match, Player, Stadium};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            field: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &[(&str, usize)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, &value.to_string());
    }
    builder.build()
}

/// Something that can be shown as a field/value table
pub trait Profile {
    fn fields(&self) -> Vec<(&'static str, String)>;
}

impl Profile for Player {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Player", self.id.to_string()),
            ("Team", self.team_id.to_string()),
            ("Age", self.age.to_string()),
            ("Height", self.height.to_string()),
            ("Foot", self.foot.to_string()),
        ]
    }
}

impl Profile for Match {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Match", self.id.to_string()),
            ("Competition", self.competition.to_string()),
            ("Home team", self.home_team_id.to_string()),
            ("Away team", self.away_team_id.to_string()),
        ]
    }
}

impl Profile for Stadium {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Stadium", self.id.to_string()),
            ("Capacity", self.capacity.to_string()),
            ("Team", self.team_id.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string())),
        ]
    }
}

pub fn entity_table(entity: &impl Profile) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in entity.fields() {
        builder.add_row(label, &value);
    }
    builder.build()
}
