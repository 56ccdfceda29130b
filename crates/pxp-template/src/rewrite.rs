//! `${expr}pxp` rewrite inside template literals.
//!
//! A binding like `` `${width}pxp` `` becomes
//! `` `calc(${width}px * var(--viewport-width) / 720)` ``. The `calc(` goes in
//! front of the `${` that opened the interpolation and the scale suffix
//! replaces the `pxp` after its closing `}`.
//!
//! Simple expressions are one string, so a single scan does it. Compound
//! expressions spread the same text over several segments with holes in
//! between, so the `${` and the `}pxp` usually sit in different segments.
//! The scanner keeps a stack of open interpolations that remembers which
//! segment and offset each `${` came from.

use crate::ast::{CompoundChild, CompoundExpression, ExpressionNode};
use pxp_value::{PxpOptions, PXP_UNIT};

const CALC_PREFIX: &str = "calc(";

/// Rewrite a directive expression in place.
pub fn rewrite_expression(exp: &mut ExpressionNode, options: &PxpOptions) {
    match exp {
        ExpressionNode::Simple(simple) => {
            simple.content = rewrite_template_literals(&simple.content, options);
        }
        ExpressionNode::Compound(compound) => rewrite_compound(compound, options),
    }
}

/// Rewrite every `${...}pxp` inside backtick templates of a single string.
pub fn rewrite_template_literals(source: &str, options: &PxpOptions) -> String {
    let suffix = options.scale_suffix();
    let mut result = source.to_string();
    let mut in_template = false;
    let mut openers: Vec<usize> = Vec::new();
    let mut pos = 0;

    // Byte scan: every delimiter is ASCII, so each splice lands on a char boundary.
    while pos < result.len() {
        let bytes = result.as_bytes();
        let ch = bytes[pos];

        if ch == b'`' {
            in_template = !in_template;
            pos += 1;
            continue;
        }

        if !in_template {
            pos += 1;
            continue;
        }

        if bytes[pos..].starts_with(b"${") {
            openers.push(pos);
            pos += 2;
            continue;
        }

        if ch == b'}' {
            if let Some(start) = openers.pop() {
                if bytes[pos + 1..].starts_with(PXP_UNIT.as_bytes()) {
                    if !has_calc_prefix(&result, start) {
                        result.insert_str(start, CALC_PREFIX);
                        pos += CALC_PREFIX.len();
                    }

                    result.replace_range(pos + 1..pos + 1 + PXP_UNIT.len(), &suffix);
                    pos += 1 + suffix.len();
                    tracing::debug!(offset = start, "rewrote pxp interpolation");
                    continue;
                }
            }
        }

        pos += 1;
    }

    result
}

/// Rewrite a compound expression and every stream nested in it.
pub fn rewrite_compound(exp: &mut CompoundExpression, options: &PxpOptions) {
    let mut rewriter = StreamRewriter::new(options);
    rewriter.rewrite(&mut exp.children);
}

/// An interpolation whose `${` has been seen but whose `}` has not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TemplateFrame {
    /// Segment holding the `${`.
    opener_index: usize,
    /// Byte offset of the `${` in that segment.
    opener_pos: usize,
    /// First hole token seen after the `${`. Only logged; the rewrite
    /// itself keys off the `}pxp` that closes the frame.
    hole_index: Option<usize>,
}

/// Scan state for one token stream. Nested streams get their own.
struct StreamRewriter<'a> {
    options: &'a PxpOptions,
    suffix: String,
    stack: Vec<TemplateFrame>,
    in_template: bool,
}

impl<'a> StreamRewriter<'a> {
    fn new(options: &'a PxpOptions) -> Self {
        Self {
            options,
            suffix: options.scale_suffix(),
            stack: Vec::new(),
            in_template: false,
        }
    }

    fn rewrite(&mut self, children: &mut [CompoundChild]) {
        for index in 0..children.len() {
            if matches!(children[index], CompoundChild::Text(_)) {
                self.scan_text(children, index);
                continue;
            }

            match &mut children[index] {
                CompoundChild::Simple(simple) => {
                    self.attach_hole(index);
                    simple.content = rewrite_template_literals(&simple.content, self.options);
                }
                CompoundChild::Compound(inner) => {
                    self.attach_hole(index);
                    rewrite_compound(inner, self.options);
                }
                CompoundChild::Text(_) | CompoundChild::Symbol(_) => {}
            }
        }
    }

    /// Record a hole against the innermost open interpolation still
    /// waiting for one.
    fn attach_hole(&mut self, index: usize) {
        if let Some(frame) = self
            .stack
            .iter_mut()
            .rev()
            .find(|frame| frame.hole_index.is_none())
        {
            frame.hole_index = Some(index);
        }
    }

    fn scan_text(&mut self, children: &mut [CompoundChild], index: usize) {
        let mut value = match &mut children[index] {
            CompoundChild::Text(text) => std::mem::take(text),
            _ => return,
        };
        let mut pos = 0;

        while pos < value.len() {
            let bytes = value.as_bytes();
            let ch = bytes[pos];

            if ch == b'`' {
                self.in_template = !self.in_template;
                pos += 1;
                continue;
            }

            if !self.in_template {
                pos += 1;
                continue;
            }

            if bytes[pos..].starts_with(b"${") {
                tracing::trace!(segment = index, offset = pos, "open interpolation");
                self.stack.push(TemplateFrame {
                    opener_index: index,
                    opener_pos: pos,
                    hole_index: None,
                });
                pos += 2;
                continue;
            }

            if ch == b'}' {
                if let Some(frame) = self.stack.pop() {
                    if bytes[pos + 1..].starts_with(PXP_UNIT.as_bytes()) {
                        let inserted = self.ensure_calc_prefix(frame, children, index, &mut value);
                        if frame.opener_index == index {
                            pos += inserted;
                        }

                        value.replace_range(pos + 1..pos + 1 + PXP_UNIT.len(), &self.suffix);
                        pos += 1 + self.suffix.len();
                        tracing::debug!(
                            opener = frame.opener_index,
                            hole = ?frame.hole_index,
                            segment = index,
                            "rewrote pxp interpolation"
                        );
                        continue;
                    }
                }
            }

            pos += 1;
        }

        children[index] = CompoundChild::Text(value);
    }

    /// Put `calc(` in front of the frame's `${`. `current` is the segment
    /// being scanned, which has been taken out of `children`. Returns the
    /// number of bytes inserted.
    fn ensure_calc_prefix(
        &mut self,
        frame: TemplateFrame,
        children: &mut [CompoundChild],
        index: usize,
        current: &mut String,
    ) -> usize {
        let target = if frame.opener_index == index {
            current
        } else {
            match children.get_mut(frame.opener_index) {
                Some(CompoundChild::Text(text)) => text,
                _ => return 0,
            }
        };

        if has_calc_prefix(target, frame.opener_pos) {
            return 0;
        }

        target.insert_str(frame.opener_pos, CALC_PREFIX);

        for other in &mut self.stack {
            if other.opener_index == frame.opener_index && other.opener_pos >= frame.opener_pos {
                other.opener_pos += CALC_PREFIX.len();
            }
        }

        CALC_PREFIX.len()
    }
}

fn has_calc_prefix(text: &str, at: usize) -> bool {
    let (before, after) = text.split_at(at);
    before.ends_with(CALC_PREFIX) || after.starts_with(CALC_PREFIX)
}
