//! The expansion state machine.
//!
//! A [`Machine`] is built for a single transform call and consumes the input
//! one character at a time. Each [`State`] maps to a plain transition
//! function; open groups live on an explicit stack of [`Frame`]s. Groups
//! that resolve are collected as [`Match`] spans in input order.

use crate::charset::is_bad_char;
use crate::options::TransformOptions;
use crate::transform::Match;

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// Between tokens.
    Init,
    /// Inside a top-level token that may still turn into a variant.
    VariantOrWord,
    /// Right after a top-level variant char.
    Variant,
    /// At the start of an item inside a group.
    StackInit,
    /// Inside an item of a group.
    StackVariantOrWord,
    /// Right after a variant char inside a group.
    StackVariant,
    /// Right after a nested group closed.
    StackClose,
}

type Transition = fn(&mut Machine<'_>, usize, char);

impl State {
    fn transition(self) -> Transition {
        match self {
            State::Init => on_init,
            State::VariantOrWord => on_variant_or_word,
            State::Variant => on_variant,
            State::StackInit => on_stack_init,
            State::StackVariantOrWord => on_stack_variant_or_word,
            State::StackVariant => on_stack_variant,
            State::StackClose => on_stack_close,
        }
    }
}

/// An open group.
#[derive(Debug)]
struct Frame<'a> {
    /// Prefix including the trailing variant char, e.g. `dark:`.
    variant: &'a str,
    start: usize,
    /// Collected items, without the prefix.
    items: Vec<String>,
    /// Child groups that already closed.
    nested: Vec<Group<'a>>,
}

impl<'a> Frame<'a> {
    /// Closes a nested frame at `end`. Its own children are not carried
    /// into the parent.
    fn close(self, end: usize) -> Group<'a> {
        Group {
            variant: self.variant,
            start: self.start,
            end,
            items: self.items,
        }
    }

    /// Closes the outermost frame at `end`, appending each child's items
    /// under the child's prefix.
    fn flatten(mut self, end: usize) -> Group<'a> {
        for child in std::mem::take(&mut self.nested) {
            let variant = child.variant;
            self.items.extend(
                child
                    .items
                    .into_iter()
                    .map(|item| format!("{}{}", variant, item)),
            );
        }
        self.close(end)
    }
}

/// A group that closed successfully.
#[derive(Debug)]
struct Group<'a> {
    variant: &'a str,
    start: usize,
    end: usize,
    items: Vec<String>,
}

impl Group<'_> {
    fn into_match(self) -> Match {
        let mut content = String::new();
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                content.push(' ');
            }
            content.push_str(self.variant);
            content.push_str(item);
        }

        Match {
            start: self.start,
            end: self.end,
            content,
        }
    }
}

/// Run-time context for one scan.
pub(crate) struct Machine<'a> {
    content: &'a str,
    options: &'a TransformOptions,
    state: State,
    stack: Vec<Frame<'a>>,
    matches: Vec<Match>,
    variant_start: usize,
    variant_end: usize,
}

impl<'a> Machine<'a> {
    pub(crate) fn new(content: &'a str, options: &'a TransformOptions) -> Self {
        Self {
            content,
            options,
            state: State::Init,
            stack: Vec::new(),
            matches: Vec::new(),
            variant_start: 0,
            variant_end: 0,
        }
    }

    /// Scans the whole input and returns the resolved spans.
    pub(crate) fn run(mut self) -> Vec<Match> {
        for (idx, c) in self.content.char_indices() {
            self.feed(idx, c);
        }

        // An unterminated group is left literal, resolved children included.
        if !self.stack.is_empty() {
            tracing::trace!(
                depth = self.stack.len(),
                "input ended inside a group, leaving it literal"
            );
        }

        self.matches
    }

    fn feed(&mut self, idx: usize, c: char) {
        let transition = self.state.transition();
        transition(self, idx, c);
    }

    fn open_group(&mut self) {
        let content = self.content;
        let end = self.variant_end + self.options.variant_char.len_utf8();
        self.stack.push(Frame {
            variant: &content[self.variant_start..end],
            start: self.variant_start,
            items: Vec::new(),
            nested: Vec::new(),
        });
        self.state = State::StackInit;
    }

    fn push_item(&mut self, idx: usize) {
        let item = &self.content[self.variant_start..idx];
        if let Some(frame) = self.stack.last_mut() {
            frame.items.push(item.to_string());
        }
        self.state = State::StackInit;
    }

    fn close_group(&mut self, idx: usize, has_word: bool) {
        let Some(mut frame) = self.stack.pop() else {
            self.state = State::Init;
            return;
        };

        if has_word {
            frame
                .items
                .push(self.content[self.variant_start..idx].to_string());
        }

        match self.stack.last_mut() {
            Some(parent) => {
                parent.nested.push(frame.close(idx));
                self.state = State::StackClose;
            }
            None => {
                tracing::trace!(start = frame.start, end = idx, "group expanded");
                self.matches.push(frame.flatten(idx).into_match());
                self.state = State::Init;
            }
        }
    }

    /// Drops every open group. Children that already closed are still
    /// emitted under their own prefix.
    fn abort_groups(&mut self, idx: usize) {
        tracing::trace!(
            position = idx,
            depth = self.stack.len(),
            "malformed group, keeping literal text"
        );

        for frame in std::mem::take(&mut self.stack) {
            self.matches
                .extend(frame.nested.into_iter().map(Group::into_match));
        }
        self.state = State::Init;
    }
}

fn on_init(m: &mut Machine<'_>, idx: usize, c: char) {
    if !is_bad_char(c) {
        m.variant_start = idx;
        m.state = State::VariantOrWord;
    }
}

fn on_variant_or_word(m: &mut Machine<'_>, idx: usize, c: char) {
    if c == m.options.variant_char {
        m.variant_end = idx;
        m.state = State::Variant;
    } else if is_bad_char(c) {
        m.state = State::Init;
    }
}

fn on_variant(m: &mut Machine<'_>, _idx: usize, c: char) {
    if c == m.options.expand_open_char {
        m.open_group();
    } else if is_bad_char(c) {
        m.state = State::Init;
    } else {
        m.state = State::VariantOrWord;
    }
}

fn on_stack_init(m: &mut Machine<'_>, idx: usize, c: char) {
    if is_bad_char(c) || c == m.options.expand_close_char {
        m.abort_groups(idx);
    } else {
        m.variant_start = idx;
        m.state = State::StackVariantOrWord;
    }
}

fn on_stack_variant_or_word(m: &mut Machine<'_>, idx: usize, c: char) {
    if c == m.options.separator_char {
        m.push_item(idx);
    } else if c == m.options.variant_char {
        m.variant_end = idx;
        m.state = State::StackVariant;
    } else if c == m.options.expand_close_char {
        m.close_group(idx, true);
    }
}

fn on_stack_variant(m: &mut Machine<'_>, idx: usize, c: char) {
    if c == m.options.expand_open_char {
        m.open_group();
    } else if is_bad_char(c) {
        m.abort_groups(idx);
    } else {
        m.state = State::StackVariantOrWord;
    }
}

fn on_stack_close(m: &mut Machine<'_>, idx: usize, c: char) {
    if is_bad_char(c) {
        m.abort_groups(idx);
    } else if c == m.options.expand_close_char {
        m.close_group(idx, false);
    } else if c == m.options.separator_char {
        m.state = State::StackInit;
    } else {
        m.abort_groups(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feeds `input` and returns the machine without finishing the run.
    fn scan<'a>(input: &'a str, options: &'a TransformOptions) -> Machine<'a> {
        let mut machine = Machine::new(input, options);
        for (idx, c) in input.char_indices() {
            machine.feed(idx, c);
        }
        machine
    }

    #[test]
    fn test_plain_word_states() {
        let options = TransformOptions::default();
        assert_eq!(scan("p-2", &options).state, State::VariantOrWord);
        assert_eq!(scan("lg:", &options).state, State::Variant);
        assert_eq!(scan("lg:p", &options).state, State::VariantOrWord);
        assert_eq!(scan("lg:p ", &options).state, State::Init);
        assert_eq!(scan("  ", &options).state, State::Init);
    }

    #[test]
    fn test_open_group_pushes_frame() {
        let options = TransformOptions::default();
        let machine = scan("x dark:(", &options);
        assert_eq!(machine.state, State::StackInit);
        assert_eq!(machine.stack.len(), 1);
        assert_eq!(machine.stack[0].variant, "dark:");
        assert_eq!(machine.stack[0].start, 2);
    }

    #[test]
    fn test_separator_collects_item() {
        let options = TransformOptions::default();
        let machine = scan("dark:(p-2,m-3,", &options);
        assert_eq!(machine.state, State::StackInit);
        assert_eq!(machine.stack[0].items, vec!["p-2", "m-3"]);
    }

    #[test]
    fn test_nested_close_waits_in_stack_close() {
        let options = TransformOptions::default();
        let machine = scan("dark:(a,lg:(b,c)", &options);
        assert_eq!(machine.state, State::StackClose);
        assert_eq!(machine.stack.len(), 1);

        let nested = &machine.stack[0].nested;
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].variant, "lg:");
        assert_eq!(nested[0].items, vec!["b", "c"]);
        assert_eq!(nested[0].start, 8);
        assert_eq!(nested[0].end, 15);
    }

    #[test]
    fn test_outer_close_emits_match() {
        let options = TransformOptions::default();
        let matches = Machine::new("dark:(a,lg:(b))", &options).run();
        assert_eq!(
            matches,
            vec![Match {
                start: 0,
                end: 14,
                content: "dark:a dark:lg:b".to_string(),
            }]
        );
    }

    #[test]
    fn test_abort_keeps_closed_children() {
        let options = TransformOptions::default();
        let machine = scan("dark:(a,lg:(b,c) ", &options);
        assert_eq!(machine.state, State::Init);
        assert!(machine.stack.is_empty());
        assert_eq!(
            machine.matches,
            vec![Match {
                start: 8,
                end: 15,
                content: "lg:b lg:c".to_string(),
            }]
        );
    }

    #[test]
    fn test_abort_on_close_after_open() {
        let options = TransformOptions::default();
        let machine = scan("dark:()", &options);
        assert_eq!(machine.state, State::Init);
        assert!(machine.stack.is_empty());
        assert!(machine.matches.is_empty());
    }

    #[test]
    fn test_abort_on_word_after_nested_close() {
        let options = TransformOptions::default();
        let machine = scan("dark:(lg:(b)x", &options);
        assert_eq!(machine.state, State::Init);
        assert_eq!(machine.matches.len(), 1);
        assert_eq!(machine.matches[0].content, "lg:b");
    }

    #[test]
    fn test_abort_collects_children_of_every_frame() {
        let options = TransformOptions::default();
        let machine = scan("a:(b:(x),c:(d:(y),\"", &options);
        let contents: Vec<_> = machine.matches.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["b:x", "d:y"]);
        assert!(machine.matches[0].end < machine.matches[1].start);
    }

    #[test]
    fn test_unterminated_group_is_dropped() {
        let options = TransformOptions::default();
        let matches = Machine::new("dark:(a,lg:(b)", &options).run();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_grandchild_not_carried_into_outer_group() {
        let options = TransformOptions::default();
        let matches = Machine::new("a:(x,b:(y,c:(z)))", &options).run();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].content, "a:x a:b:y");
    }

    #[test]
    fn test_nested_close_keeps_only_own_items() {
        let options = TransformOptions::default();
        let machine = scan("a:(b:(y,c:(z))", &options);
        assert_eq!(machine.state, State::StackClose);

        let nested = &machine.stack[0].nested;
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].variant, "b:");
        assert_eq!(nested[0].items, vec!["y"]);
    }
}
