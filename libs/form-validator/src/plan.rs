use crate::schema::{Answer, Question, QuestionType, Schema};

/// Flattened list of independent checks for one schema
#[derive(Debug, Clone, Default)]
pub struct ValidationPlan<'a> {
    pub checks: Vec<Check<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check<'a> {
    /// Resolve the question's concept, then check answers and rendering.
    Concept(&'a Question),
    PatientIdentifier(&'a Question),
    /// Confirm one declared answer's concept exists.
    Answer(&'a Answer),
}

// ============================================================================
// Traversal
// ============================================================================

impl<'a> ValidationPlan<'a> {
    pub fn for_schema(schema: &'a Schema) -> Self {
        let mut plan = Self::default();
        for question in schema.questions() {
            plan.add_question(question);
        }
        plan
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    fn add_question(&mut self, question: &'a Question) {
        match question.question_type {
            QuestionType::Obs => self.checks.push(Check::Concept(question)),
            QuestionType::ObsGroup => self.add_group_members(question),
            QuestionType::PatientIdentifier => {
                self.checks.push(Check::PatientIdentifier(question))
            }
            QuestionType::Other(_) => {}
        }
        self.add_answers(question);
    }

    // Every group member captures an observation, whatever its declared type.
    fn add_group_members(&mut self, group: &'a Question) {
        for member in &group.questions {
            match member.question_type {
                QuestionType::ObsGroup => self.add_group_members(member),
                QuestionType::PatientIdentifier => {
                    self.checks.push(Check::PatientIdentifier(member))
                }
                _ => self.checks.push(Check::Concept(member)),
            }
            self.add_answers(member);
        }
    }

    fn add_answers(&mut self, question: &'a Question) {
        self.checks.extend(
            question
                .question_options
                .answers
                .iter()
                .map(Check::Answer),
        );
    }
}
