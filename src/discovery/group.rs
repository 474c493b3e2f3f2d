//! The unit of reassembly: one package and its fragments.

use crate::fragment::Fragment;

/// Fragments that reassemble into one merged output file.
///
/// A group exists once either a verified root fragment or a terminal
/// fragment has been seen for its identifier. Terminal-only groups have no
/// root; the terminal then stands in for the whole package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    identifier: String,
    root: Option<Fragment>,
    numbered: Vec<Fragment>,
    terminal: Option<Fragment>,
    output_name_override: Option<String>,
}

impl Group {
    /// Start a group anchored by a verified root fragment.
    #[must_use]
    pub fn with_root(identifier: impl Into<String>, root: Fragment) -> Self {
        Self {
            identifier: identifier.into(),
            root: Some(root),
            numbered: Vec::new(),
            terminal: None,
            output_name_override: None,
        }
    }

    /// Start a provisional group from a terminal fragment alone.
    ///
    /// The terminal's base name becomes both identifier and output name.
    #[must_use]
    pub fn from_terminal(base: impl Into<String>, terminal: Fragment) -> Self {
        let base = base.into();
        Self {
            identifier: base.clone(),
            root: None,
            numbered: Vec::new(),
            terminal: Some(terminal),
            output_name_override: Some(base),
        }
    }

    /// Add a numbered fragment. Order is resolved at merge time.
    pub fn push_numbered(&mut self, fragment: Fragment) { self.numbered.push(fragment); }

    /// Attach the terminal fragment and rename the output after `base`.
    ///
    /// Replaces any previously attached terminal.
    pub fn attach_terminal(&mut self, base: impl Into<String>, terminal: Fragment) {
        self.terminal = Some(terminal);
        self.output_name_override = Some(base.into());
    }

    /// Identifier derived from fragment names.
    #[must_use]
    pub fn identifier(&self) -> &str { &self.identifier }

    /// The verified root fragment, if any.
    #[must_use]
    pub fn root(&self) -> Option<&Fragment> { self.root.as_ref() }

    /// Numbered fragments in discovery order.
    #[must_use]
    pub fn numbered(&self) -> &[Fragment] { &self.numbered }

    /// The terminal fragment, if any.
    #[must_use]
    pub fn terminal(&self) -> Option<&Fragment> { self.terminal.as_ref() }

    /// Output name taken from the terminal fragment, if any.
    #[must_use]
    pub fn output_name_override(&self) -> Option<&str> { self.output_name_override.as_deref() }

    /// Stem of the merged file name.
    #[must_use]
    pub fn output_stem(&self) -> &str {
        self.output_name_override
            .as_deref()
            .unwrap_or(&self.identifier)
    }

    /// Number of pieces appended after the root.
    #[must_use]
    pub fn piece_count(&self) -> usize { self.numbered.len() + usize::from(self.terminal.is_some()) }

    /// Fragments in output order: root, numbered ascending, terminal.
    ///
    /// Numbered fragments sharing an ordinal are ordered by file name.
    #[must_use]
    pub fn fragments_in_merge_order(&self) -> Vec<&Fragment> {
        let mut numbered: Vec<&Fragment> = self.numbered.iter().collect();
        numbered.sort_by(|a, b| a.merge_order(b));
        self.root
            .iter()
            .chain(numbered)
            .chain(self.terminal.iter())
            .collect()
    }
}
