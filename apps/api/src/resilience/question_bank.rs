//! Pre-authored interview questions used when the quiz model cannot be reached.
//!
//! Order, options and answers are fixed data. Only questions 1, 2 and 6
//! interpolate the candidate's primary skill or industry.

use crate::resilience::fallback::{or_default, FallbackContext, QuizQuestion};

pub const QUESTION_COUNT: usize = 10;

/// Question text. Interpolated variants hold the text around the value, so the
/// substituted value is spliced in once and never rescanned.
enum Prompt {
    Fixed(&'static str),
    Skill(&'static str, &'static str),
    Industry(&'static str, &'static str),
}

impl Prompt {
    fn render(&self, skill: &str, industry: &str) -> String {
        match self {
            Prompt::Fixed(text) => text.to_string(),
            Prompt::Skill(before, after) => format!("{before}{skill}{after}"),
            Prompt::Industry(before, after) => format!("{before}{industry}{after}"),
        }
    }
}

struct Template {
    question: Prompt,
    options: [&'static str; 4],
    /// Index into `options`.
    answer: usize,
    explanation: &'static str,
}

const TEMPLATES: [Template; QUESTION_COUNT] = [
    Template {
        question: Prompt::Skill("Describe your experience with ", "."),
        options: [
            "5+ years of professional experience",
            "2-5 years of professional experience",
            "Less than 2 years of experience",
            "No professional experience",
        ],
        answer: 0,
        explanation: "This question assesses your depth of experience.",
    },
    Template {
        question: Prompt::Industry("What is your approach to problem-solving in ", " projects?"),
        options: [
            "Systematic analysis followed by implementation",
            "Quick trial and error approach",
            "Asking for help immediately",
            "Avoiding complex problems",
        ],
        answer: 0,
        explanation: "Professional problem-solving requires a structured approach.",
    },
    Template {
        question: Prompt::Fixed("How do you stay updated with industry trends?"),
        options: [
            "Regular reading of industry publications and online courses",
            "Only when required by work",
            "Not really concerned about trends",
            "Rely on colleagues for information",
        ],
        answer: 0,
        explanation: "Continuous learning is essential in tech fields.",
    },
    Template {
        question: Prompt::Fixed("Describe a challenging project you completed."),
        options: [
            "Detailed explanation with specific metrics and learnings",
            "Vague description with few details",
            "Never worked on challenging projects",
            "Let others describe my projects",
        ],
        answer: 0,
        explanation: "Good candidates can articulate their achievements clearly.",
    },
    Template {
        question: Prompt::Fixed("How do you handle working with diverse teams?"),
        options: [
            "Actively seek different perspectives and collaborate effectively",
            "Prefer working alone",
            "Follow others' decisions",
            "Focus only on individual tasks",
        ],
        answer: 0,
        explanation: "Teamwork and collaboration are critical skills.",
    },
    Template {
        question: Prompt::Industry("What interests you about ", "?"),
        options: [
            "Passion for innovation and solving real-world problems",
            "Just need a job",
            "High salary expectations",
            "Heard it was easy",
        ],
        answer: 0,
        explanation: "Genuine interest shows in an interview.",
    },
    Template {
        question: Prompt::Fixed("Where do you see yourself in 5 years?"),
        options: [
            "Growing as a specialist or team leader in my field",
            "Not sure",
            "Somewhere else",
            "Retired",
        ],
        answer: 0,
        explanation: "Career vision shows ambition and direction.",
    },
    Template {
        question: Prompt::Fixed("How do you handle failure?"),
        options: [
            "Analyze, learn, and implement improvements",
            "Blame external factors",
            "Give up",
            "Pretend it didn't happen",
        ],
        answer: 0,
        explanation: "Resilience and learning from failure are important traits.",
    },
    Template {
        question: Prompt::Fixed("What is your greatest strength?"),
        options: [
            "Problem-solving with specific examples",
            "Everything",
            "Nothing in particular",
            "My good looks",
        ],
        answer: 0,
        explanation: "Self-awareness and concrete examples are valued.",
    },
    Template {
        question: Prompt::Fixed("Why should we hire you?"),
        options: [
            "Specific skills match, proven track record, and cultural fit",
            "I need the job",
            "No particular reason",
            "I'm just checking applications",
        ],
        answer: 0,
        explanation: "This shows you've researched and understand value alignment.",
    },
];

pub fn interview_questions(context: &FallbackContext) -> Vec<QuizQuestion> {
    let skill = or_default(
        context.skills.first().map(String::as_str),
        "the required technologies",
    );
    let industry = or_default(context.industry.as_deref(), "technology");

    TEMPLATES
        .iter()
        .map(|t| QuizQuestion {
            question: t.question.render(skill, industry),
            options: t.options.iter().map(|o| o.to_string()).collect(),
            correct_answer: t.options[t.answer].to_string(),
            explanation: t.explanation.to_string(),
        })
        .collect()
}
