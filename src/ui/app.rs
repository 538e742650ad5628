use crate::error::GraphError;
use crate::graph::{ModelSource, Session};
use crate::model::{AttrContent, AttrValue, Content, GraphNode, Point};
use crate::parser::IfcModel;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{DefaultTerminal, Frame};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Node,
    TypeIndex,
}

/// Column of the node view holding focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPanel {
    Inverse,
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndexPanel {
    Types,
    Lines,
}

/// One row of an attribute column: an attribute or one entry of a list.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    /// Empty on the continuation rows of a list.
    pub name: String,
    pub text: String,
    pub target: Option<u64>,
    pub anchor: Point,
}

pub struct App<S = IfcModel> {
    pub session: Session<S>,
    pub node: GraphNode,
    pub history: Vec<u64>,
    pub view: View,
    pub focus_panel: FocusPanel,
    pub index_panel: IndexPanel,
    pub selected_row: usize,
    pub selected_type: usize,
    pub selected_line: usize,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl<S: ModelSource> App<S> {
    #[must_use]
    pub fn new(session: Session<S>, root: GraphNode) -> Self {
        Self {
            session,
            node: root,
            history: Vec::new(),
            view: View::Node,
            focus_panel: FocusPanel::Forward,
            index_panel: IndexPanel::Types,
            selected_row: 0,
            selected_type: 0,
            selected_line: 0,
            status: None,
            should_quit: false,
        }
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Node => super::view::draw_node(frame, self),
            View::TypeIndex => super::view::draw_type_index(frame, self),
        }
    }

    fn handle_events(&mut self) -> Result<()> {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }
            self.handle_key(key.code);
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match self.view {
            View::Node => self.handle_node_keys(code),
            View::TypeIndex => self.handle_index_keys(code),
        }
    }

    fn handle_node_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace => self.go_back(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_row < self.focused_rows().len().saturating_sub(1) {
                    self.selected_row += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => self.focus(FocusPanel::Inverse),
            KeyCode::Right | KeyCode::Char('l') => self.focus(FocusPanel::Forward),
            KeyCode::Enter => self.follow_selected(),
            KeyCode::Char('r') => {
                let root = self.session.root_id();
                self.open(root);
            }
            KeyCode::Char('t') => self.view = View::TypeIndex,
            _ => {}
        }
    }

    fn handle_index_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('t') => self.view = View::Node,
            KeyCode::Left | KeyCode::Char('h') => self.index_panel = IndexPanel::Types,
            KeyCode::Right | KeyCode::Char('l') => self.index_panel = IndexPanel::Lines,
            KeyCode::Up | KeyCode::Char('k') => match self.index_panel {
                IndexPanel::Types => {
                    self.selected_type = self.selected_type.saturating_sub(1);
                    self.selected_line = 0;
                }
                IndexPanel::Lines => self.selected_line = self.selected_line.saturating_sub(1),
            },
            KeyCode::Down | KeyCode::Char('j') => match self.index_panel {
                IndexPanel::Types => {
                    if self.selected_type < self.session.type_index().len().saturating_sub(1) {
                        self.selected_type += 1;
                        self.selected_line = 0;
                    }
                }
                IndexPanel::Lines => {
                    if self.selected_line < self.selected_type_ids().len().saturating_sub(1) {
                        self.selected_line += 1;
                    }
                }
            },
            KeyCode::Enter => match self.index_panel {
                IndexPanel::Types => self.index_panel = IndexPanel::Lines,
                IndexPanel::Lines => {
                    if let Some(&id) = self.selected_type_ids().get(self.selected_line) {
                        self.open(id);
                        self.view = View::Node;
                    }
                }
            },
            _ => {}
        }
    }

    fn focus(&mut self, panel: FocusPanel) {
        if self.focus_panel != panel {
            self.focus_panel = panel;
            self.selected_row = 0;
        }
    }

    fn follow_selected(&mut self) {
        let target = self
            .focused_rows()
            .get(self.selected_row)
            .and_then(|row| row.target);
        if let Some(id) = target {
            self.open(id);
        }
    }

    /// Replaces the shown node, remembering the current one.
    pub fn open(&mut self, id: u64) {
        if id == self.node.id {
            return;
        }
        match self.session.add_node(id) {
            Ok(node) => {
                self.history.push(self.node.id);
                self.show(node);
            }
            Err(err) => self.report(&err),
        }
    }

    fn go_back(&mut self) {
        let Some(id) = self.history.pop() else {
            return;
        };
        match self.session.add_node(id) {
            Ok(node) => self.show(node),
            Err(err) => self.report(&err),
        }
    }

    fn show(&mut self, node: GraphNode) {
        self.node = node;
        self.selected_row = 0;
        self.status = None;
    }

    fn report(&mut self, err: &GraphError) {
        self.status = Some(err.to_string());
    }

    #[must_use]
    pub fn rows(&self, inverse: bool) -> Vec<EntryRow> {
        let mut rows = Vec::new();
        for attribute in self.node.attributes.iter().filter(|a| a.inverse == inverse) {
            match &attribute.content {
                Content::One(entry) => rows.push(EntryRow {
                    name: attribute.name.clone(),
                    text: entry_text(entry),
                    target: entry.target(),
                    anchor: attribute.edge_anchor,
                }),
                Content::Many(entries) if entries.is_empty() => rows.push(EntryRow {
                    name: attribute.name.clone(),
                    text: "()".to_string(),
                    target: None,
                    anchor: attribute.edge_anchor,
                }),
                Content::Many(entries) => {
                    for (i, entry) in entries.iter().enumerate() {
                        rows.push(EntryRow {
                            name: if i == 0 {
                                attribute.name.clone()
                            } else {
                                String::new()
                            },
                            text: entry_text(entry),
                            target: entry.target(),
                            anchor: attribute.edge_anchor,
                        });
                    }
                }
            }
        }
        rows
    }

    #[must_use]
    pub fn focused_rows(&self) -> Vec<EntryRow> {
        self.rows(self.focus_panel == FocusPanel::Inverse)
    }

    #[must_use]
    pub fn selected_type_name(&self) -> Option<&str> {
        self.session
            .type_index()
            .iter()
            .nth(self.selected_type)
            .map(|(name, _)| name)
    }

    #[must_use]
    pub fn selected_type_ids(&self) -> &[u64] {
        self.session
            .type_index()
            .iter()
            .nth(self.selected_type)
            .map_or(&[][..], |(_, ids)| ids)
    }
}

/// Display text of one entry.
#[must_use]
pub fn entry_text(entry: &AttrContent) -> String {
    match entry {
        AttrContent::Reference(Some(id)) => format!("#{id}"),
        AttrContent::Reference(None) | AttrContent::Value(AttrValue::Null) => "$".to_string(),
        AttrContent::Value(AttrValue::Integer(value)) => value.to_string(),
        AttrContent::Value(AttrValue::Number(value)) => value.to_string(),
        AttrContent::Value(AttrValue::Text(text)) => format!("'{text}'"),
        AttrContent::Value(AttrValue::Numbers(values)) => {
            let joined = values
                .iter()
                .map(f64::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("({joined})")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MODEL: &str = "ISO-10303-21;
DATA;
#1=IFCPROJECT('p',$,'Project',$,$,$,$,$,$);
#2=IFCSITE('s',$,'Site',$,$,$,$,$,.ELEMENT.,$,$,$,$,$);
#3=IFCRELAGGREGATES('r',$,$,$,#1,(#2));
ENDSEC;
END-ISO-10303-21;
";

    fn app() -> App {
        let (session, root) = Session::open(MODEL.as_bytes()).unwrap();
        App::new(session, root)
    }

    fn select(app: &mut App, target: u64) {
        let row = app
            .focused_rows()
            .iter()
            .position(|r| r.target == Some(target))
            .unwrap();
        app.selected_row = row;
    }

    #[test]
    fn follows_references_and_walks_back() {
        let mut app = app();
        assert_eq!(app.node.id, 1);

        app.handle_key(KeyCode::Left);
        select(&mut app, 3);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.node.entity_type, "IfcRelAggregates");

        app.handle_key(KeyCode::Right);
        select(&mut app, 2);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.node.id, 2);
        assert_eq!(app.history, vec![1, 3]);

        app.handle_key(KeyCode::Backspace);
        assert_eq!(app.node.id, 3);
        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Backspace);
        assert_eq!(app.node.id, 1);
        assert!(app.history.is_empty());
    }

    #[test]
    fn list_entries_get_their_own_rows() {
        let mut app = app();
        app.open(3);
        let rows = app.rows(false);
        let related: Vec<(&str, &str)> = rows
            .iter()
            .filter(|r| r.target == Some(2) || r.target == Some(1))
            .map(|r| (r.name.as_str(), r.text.as_str()))
            .collect();
        assert_eq!(related, vec![("RelatingObject", "#1"), ("RelatedObjects", "#2")]);
    }

    #[test]
    fn opens_lines_from_the_type_index() {
        let mut app = app();
        app.handle_key(KeyCode::Char('t'));
        assert_eq!(app.view, View::TypeIndex);

        while app.selected_type_name() != Some("IfcSite") {
            app.handle_key(KeyCode::Down);
        }
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.view, View::Node);
        assert_eq!(app.node.id, 2);
    }

    #[test]
    fn unknown_target_sets_status() {
        let mut app = app();
        app.open(99);
        assert_eq!(app.node.id, 1);
        assert!(app.status.is_some());
    }

    #[test]
    fn entry_texts() {
        assert_eq!(entry_text(&AttrContent::Reference(None)), "$");
        assert_eq!(entry_text(&AttrContent::Reference(Some(4))), "#4");
        assert_eq!(
            entry_text(&AttrContent::Value(AttrValue::Numbers(vec![0.0, 2.5]))),
            "(0, 2.5)"
        );
        assert_eq!(
            entry_text(&AttrContent::Value(AttrValue::Text("W".to_string()))),
            "'W'"
        );
    }
}
