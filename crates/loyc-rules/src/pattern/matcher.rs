//! Structural matching with backtracking run captures

use super::{Captures, Placeholder, check_pattern_attrs};
use loyc_core::{Node, NodeKind, Result};
use tracing::trace;

/// Match `candidate` against `pattern`.
///
/// Returns `Ok(false)` on any mismatch; `captures` may then hold bindings
/// from the failed attempt and must be discarded. Trivia attributes of the
/// candidate root are appended to `unmatched_attrs`; any other candidate
/// attribute makes the match fail. Non-trivia attributes on the pattern are
/// an `UnsupportedPattern` error.
pub fn match_pattern(
    candidate: &Node,
    pattern: &Node,
    captures: &mut Captures,
    unmatched_attrs: &mut Vec<Node>,
) -> Result<bool> {
    if !match_node(candidate, pattern, captures)? {
        return Ok(false);
    }
    if Placeholder::of(pattern).is_none() {
        unmatched_attrs.extend(candidate.attrs().iter().cloned());
    }
    Ok(true)
}

fn match_node(candidate: &Node, pattern: &Node, captures: &mut Captures) -> Result<bool> {
    check_pattern_attrs(pattern)?;

    if let Some(placeholder) = Placeholder::of(pattern) {
        if placeholder.multi {
            captures.bind_run(placeholder.name, std::slice::from_ref(candidate));
        } else {
            captures.bind(placeholder.name, candidate.clone());
        }
        return Ok(true);
    }

    if let Some(attr) = candidate.attrs().iter().find(|attr| !attr.is_trivia()) {
        trace!(%candidate, %attr, "candidate attribute has no counterpart");
        return Ok(false);
    }
    if candidate.kind() != pattern.kind() {
        trace!(%candidate, %pattern, "kind mismatch");
        return Ok(false);
    }

    match pattern.kind() {
        NodeKind::Identifier => Ok(candidate.name() == pattern.name()),
        NodeKind::Literal => Ok(candidate.literal_data() == pattern.literal_data()),
        NodeKind::Call => {
            let (Some(target), Some(pattern_target)) = (candidate.target(), pattern.target())
            else {
                return Ok(false);
            };
            if !match_node(target, pattern_target, captures)? {
                return Ok(false);
            }
            let args: Vec<Node> = candidate.args().iter().cloned().collect();
            let pattern_args: Vec<Node> = pattern.args().iter().cloned().collect();
            match_args(&args, &pattern_args, captures)
        }
    }
}

/// Align `args` with `patterns` from the end. A run capture takes the
/// longest tail that still lets the patterns in front of it match, so of two
/// run captures the earlier one stays as short as possible.
fn match_args(args: &[Node], patterns: &[Node], captures: &mut Captures) -> Result<bool> {
    let Some((pattern, patterns_before)) = patterns.split_last() else {
        return Ok(args.is_empty());
    };

    match Placeholder::of(pattern) {
        Some(placeholder) if placeholder.multi => {
            check_pattern_attrs(pattern)?;
            for taken in (0..=args.len()).rev() {
                let split = args.len() - taken;
                let saved = captures.clone();
                captures.bind_run(placeholder.name.clone(), &args[split..]);
                if match_args(&args[..split], patterns_before, captures)? {
                    return Ok(true);
                }
                trace!(capture = %placeholder.name, taken, "backtracking run capture");
                *captures = saved;
            }
            Ok(false)
        }
        _ => {
            let Some((arg, args_before)) = args.split_last() else {
                return Ok(false);
            };
            if !match_node(arg, pattern, captures)? {
                return Ok(false);
            }
            match_args(args_before, patterns_before, captures)
        }
    }
}
