//! Round and dataset evaluation on top of the matcher.

use std::fmt;

use tracing::{info, info_span};

use eval_model::{
    DatasetEvaluation, DatasetStandards, ExperimentKind, LabeledRound, MatchOutcome, ModelId,
    NonPunishRule, RoundEvaluation, Term, TermPair,
};

use crate::engine::{match_associations, match_classes};
use crate::exemption::remove_non_punished;
use crate::metrics::compute_metrics;
use crate::synonym::{SynonymMap, expand_synonym_mapping};

/// Scores rounds of one dataset. The synonym lookup is built once.
#[derive(Debug)]
pub struct Evaluator<'a> {
    standards: &'a DatasetStandards,
    synonyms: SynonymMap,
}

impl<'a> Evaluator<'a> {
    pub fn new(standards: &'a DatasetStandards) -> Self {
        Self {
            standards,
            synonyms: expand_synonym_mapping(&standards.synonyms),
        }
    }

    pub fn standards(&self) -> &DatasetStandards {
        self.standards
    }

    pub fn synonyms(&self) -> &SynonymMap {
        &self.synonyms
    }

    /// Class round: matching, non-punishment for both views, metrics.
    pub fn evaluate_class_round(&self, index: usize, label: &str, terms: &[Term]) -> RoundEvaluation {
        let _span = info_span!("round", round = index + 1, label).entered();
        let outcome = match_classes(terms, &self.standards.classes, &self.synonyms);
        score_round(index, label, outcome, &self.standards.non_punish)
    }

    /// Association round. Non-punishment rules do not apply to pairs.
    pub fn evaluate_association_round(
        &self,
        index: usize,
        label: &str,
        pairs: &[TermPair],
    ) -> RoundEvaluation {
        let _span = info_span!("round", round = index + 1, label).entered();
        let outcome = match_associations(pairs, &self.standards.associations, &self.synonyms);
        score_round(index, label, outcome, &[])
    }

    pub fn evaluate_classes(&self, model: ModelId, rounds: &[LabeledRound<Term>]) -> DatasetEvaluation {
        let _span = info_span!(
            "evaluate",
            model = model.as_str(),
            dataset = %self.standards.dataset,
            kind = "class"
        )
        .entered();
        let mut evaluation =
            DatasetEvaluation::new(model, self.standards.dataset.clone(), ExperimentKind::Class);
        for (index, round) in rounds.iter().enumerate() {
            let evaluated = self.evaluate_class_round(index, &round.label, &round.items);
            evaluation.rounds.push(evaluated);
        }
        evaluation
    }

    pub fn evaluate_associations(
        &self,
        model: ModelId,
        rounds: &[LabeledRound<TermPair>],
    ) -> DatasetEvaluation {
        let _span = info_span!(
            "evaluate",
            model = model.as_str(),
            dataset = %self.standards.dataset,
            kind = "association"
        )
        .entered();
        let mut evaluation = DatasetEvaluation::new(
            model,
            self.standards.dataset.clone(),
            ExperimentKind::Association,
        );
        for (index, round) in rounds.iter().enumerate() {
            let evaluated = self.evaluate_association_round(index, &round.label, &round.items);
            evaluation.rounds.push(evaluated);
        }
        evaluation
    }
}

fn render<T: fmt::Display>(items: impl IntoIterator<Item = T>) -> Vec<String> {
    items.into_iter().map(|item| item.to_string()).collect()
}

fn score_round<I, K>(
    index: usize,
    label: &str,
    outcome: MatchOutcome<I, K>,
    rules: &[NonPunishRule],
) -> RoundEvaluation
where
    I: fmt::Display,
    K: Ord + fmt::Display,
{
    let mandatory_matched = render(&outcome.mandatory_matched);
    let all_matched = render(outcome.all_matched());
    let mandatory_unmatched = render(&outcome.mandatory_unmatched);
    let all_unmatched = render(outcome.all_unmatched());

    let mut log = outcome.log;
    let mandatory_fp =
        remove_non_punished(&mandatory_unmatched, &mandatory_matched, rules, &mut log);
    let full_fp = remove_non_punished(&all_unmatched, &all_matched, rules, &mut log);
    log.extend(
        outcome
            .remaining_gold_full
            .iter()
            .map(|key| format!("[Missing] {key}")),
    );

    let mandatory = compute_metrics(
        &mandatory_matched,
        &mandatory_fp,
        &outcome.remaining_gold_mandatory,
        index,
    );
    let including_optional =
        compute_metrics(&all_matched, &full_fp, &outcome.remaining_gold_full, index);
    info!(
        tp = including_optional.tp,
        fp = including_optional.fp,
        fn_ = including_optional.fn_,
        f1 = including_optional.f1,
        "round scored"
    );

    RoundEvaluation {
        round: index + 1,
        label: label.to_string(),
        mandatory,
        including_optional,
        false_positives: full_fp,
        log,
    }
}
