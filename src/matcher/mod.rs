use crate::models::{ActiveContext, ContentRef, MatchRule, RuleSet, TitleMatch};
use log::debug;

/// Picks the cheat-sheet content for the given context.
///
/// Pure function of its inputs: same context and rules always yield the
/// same reference, and it always yields one (the fallback when no rule is
/// a candidate). A rule is a candidate when its process list is empty or
/// contains the lowercased process name, and its title pattern (if any)
/// does not reject the title. Among candidates the strictly highest
/// specificity wins; ties go to the earliest rule in the set.
pub fn select<'a>(context: &ActiveContext, rules: &'a RuleSet) -> &'a ContentRef {
    let process = context.process_name.to_lowercase();

    let mut best: Option<(usize, &'a MatchRule)> = None;
    for rule in rules.rules() {
        if !rule.applies_to_process(&process) {
            continue;
        }
        if rule.title_match(&context.window_title) == TitleMatch::NotMatched {
            continue;
        }
        let score = rule.specificity();
        // Strict comparison keeps the earlier rule on equal scores.
        if best.map_or(true, |(top, _)| score > top) {
            best = Some((score, rule));
        }
    }

    match best {
        Some((score, rule)) => {
            debug!("rule {:?} selected for {:?} (score {score})", rule.name, process);
            &rule.content
        }
        None => rules.fallback(),
    }
}
