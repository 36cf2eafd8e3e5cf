//! Static learning-path catalog and plan generation.
//!
//! This service is a lookup, not a model: a fixed resource catalog is filtered by
//! subject and skill range into ordered phases, with a few notes keyed off the
//! requested learning style and goals.

use serde::{Deserialize, Serialize};

/// Learner skill level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    /// No prior experience.
    Beginner,
    /// Working knowledge.
    Intermediate,
    /// Deep proficiency.
    Advanced,
}

/// Why the learner is studying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningGoal {
    /// Switching careers.
    CareerChange,
    /// Leveling up an existing skill.
    SkillImprovement,
    /// Preparing for a certification exam.
    Certification,
    /// Learning for its own sake.
    PersonalInterest,
    /// Coursework support.
    Academic,
}

/// Preferred way of absorbing material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    /// Diagrams and video.
    Visual,
    /// Podcasts and lectures.
    Auditory,
    /// Hands-on practice.
    Kinesthetic,
    /// Books and articles.
    Reading,
    /// No strong preference.
    Mixed,
}

/// A single catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    /// Resource title.
    pub title: &'static str,
    /// Resource kind (course, book, video, article).
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Publishing provider.
    pub provider: &'static str,
    /// Rough time investment.
    pub duration: &'static str,
    /// Difficulty tier the resource targets.
    pub difficulty: SkillLevel,
    /// Optional canonical URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'static str>,
    /// One-line description.
    pub description: &'static str,
    /// Skills the resource covers.
    pub skills_covered: &'static [&'static str],
}

/// Request body for `/learning/suggest`.
#[derive(Debug, Clone, Deserialize)]
pub struct LearningPathRequest {
    /// Subject to study.
    pub subject: String,
    /// Where the learner starts.
    pub current_skill_level: SkillLevel,
    /// Where the learner wants to end up.
    pub target_skill_level: SkillLevel,
    /// Motivations for studying.
    #[serde(default)]
    pub learning_goals: Vec<LearningGoal>,
    /// Preferred learning style.
    pub learning_style: LearningStyle,
    /// Weekly time budget, free-form (e.g. "5 hours/week").
    pub time_commitment: String,
    /// Overall timeline, free-form (e.g. "3 months").
    pub timeline: String,
}

/// One phase of a generated plan.
#[derive(Debug, Clone, Serialize)]
pub struct Phase {
    /// 1-based phase number.
    pub phase: u32,
    /// Phase title.
    pub title: String,
    /// What the phase accomplishes.
    pub description: String,
    /// Expected duration range.
    pub duration: String,
    /// Resources to work through.
    pub resources: Vec<Resource>,
    /// Objectives to complete before moving on.
    pub learning_objectives: Vec<String>,
    #[serde(skip)]
    min_weeks: u32,
}

/// A generated learning plan.
#[derive(Debug, Clone, Serialize)]
pub struct LearningPath {
    /// Catalog subject the request matched.
    pub subject: &'static str,
    /// `current → target` skill progression.
    pub skill_progression: String,
    /// Style- and goal-specific notes.
    pub learning_style_accommodations: Vec<String>,
    /// Ordered study phases.
    pub phases: Vec<Phase>,
    /// Echo of the requested schedule.
    pub study_schedule: StudySchedule,
    /// Lower-bound timeline across all phases, e.g. `"10 weeks (2 months)"`.
    pub estimated_timeline: String,
    /// Total number of recommended resources.
    pub total_resources: usize,
}

/// Requested schedule echoed back with a pacing hint.
#[derive(Debug, Clone, Serialize)]
pub struct StudySchedule {
    /// Weekly time budget from the request.
    pub time_commitment: String,
    /// Overall timeline from the request.
    pub timeline: String,
    /// Fixed pacing recommendation.
    pub recommended_pace: &'static str,
}

struct SubjectCatalog {
    subject: &'static str,
    beginner: &'static [Resource],
    intermediate: &'static [Resource],
    advanced: &'static [Resource],
}

const fn resource(
    title: &'static str,
    kind: &'static str,
    provider: &'static str,
    duration: &'static str,
    difficulty: SkillLevel,
    url: Option<&'static str>,
    description: &'static str,
    skills_covered: &'static [&'static str],
) -> Resource {
    Resource {
        title,
        kind,
        provider,
        duration,
        difficulty,
        url,
        description,
        skills_covered,
    }
}

static CATALOG: &[SubjectCatalog] = &[
    SubjectCatalog {
        subject: "python",
        beginner: &[
            resource(
                "Python for Everybody Specialization",
                "course",
                "Coursera",
                "8 months",
                SkillLevel::Beginner,
                Some("https://coursera.org/specializations/python"),
                "Complete Python programming specialization covering basics to data structures",
                &["Python basics", "Data structures", "Web scraping", "Databases"],
            ),
            resource(
                "Automate the Boring Stuff with Python",
                "book",
                "No Starch Press",
                "4-6 weeks",
                SkillLevel::Beginner,
                Some("https://automatetheboringstuff.com/"),
                "Practical Python programming book with real-world projects",
                &["Python basics", "File handling", "GUI automation"],
            ),
        ],
        intermediate: &[
            resource(
                "Python Data Science Handbook",
                "book",
                "O'Reilly",
                "8-10 weeks",
                SkillLevel::Intermediate,
                None,
                "Essential tools for working with data in Python",
                &["NumPy", "Pandas", "Matplotlib", "Scikit-learn"],
            ),
            resource(
                "Real Python Tutorials",
                "course",
                "Real Python",
                "Ongoing",
                SkillLevel::Intermediate,
                Some("https://realpython.com/"),
                "In-depth Python tutorials and courses",
                &["Advanced Python", "Web development", "Testing"],
            ),
        ],
        advanced: &[resource(
            "Effective Python",
            "book",
            "Addison-Wesley",
            "6-8 weeks",
            SkillLevel::Advanced,
            None,
            "90 specific ways to write better Python",
            &["Best practices", "Performance optimization", "Advanced patterns"],
        )],
    },
    SubjectCatalog {
        subject: "web development",
        beginner: &[
            resource(
                "The Complete Web Developer Course",
                "course",
                "Udemy",
                "12 weeks",
                SkillLevel::Beginner,
                None,
                "Full-stack web development from scratch",
                &["HTML", "CSS", "JavaScript", "Node.js"],
            ),
            resource(
                "MDN Web Docs",
                "article",
                "Mozilla",
                "Ongoing",
                SkillLevel::Beginner,
                Some("https://developer.mozilla.org/"),
                "Comprehensive web development documentation",
                &["HTML", "CSS", "JavaScript", "Web APIs"],
            ),
        ],
        intermediate: &[resource(
            "React - The Complete Guide",
            "course",
            "Udemy",
            "10 weeks",
            SkillLevel::Intermediate,
            None,
            "Master React with hooks, context, and advanced patterns",
            &["React", "Redux", "Testing"],
        )],
        advanced: &[],
    },
    SubjectCatalog {
        subject: "machine learning",
        beginner: &[resource(
            "Machine Learning Course",
            "course",
            "Coursera - Andrew Ng",
            "11 weeks",
            SkillLevel::Beginner,
            Some("https://coursera.org/learn/machine-learning"),
            "Comprehensive introduction to machine learning",
            &["Supervised learning", "Unsupervised learning", "Neural networks"],
        )],
        intermediate: &[resource(
            "Deep Learning Specialization",
            "course",
            "Coursera - deeplearning.ai",
            "16 weeks",
            SkillLevel::Intermediate,
            None,
            "Deep learning and neural networks specialization",
            &["Deep learning", "CNN", "RNN"],
        )],
        advanced: &[],
    },
];

/// Subjects available in the catalog.
pub fn subjects() -> Vec<&'static str> {
    CATALOG.iter().map(|entry| entry.subject).collect()
}

fn match_subject(requested: &str) -> &'static SubjectCatalog {
    let lowered = requested.to_lowercase();
    CATALOG
        .iter()
        .find(|entry| lowered.contains(entry.subject) || entry.subject.contains(&lowered))
        // Unknown subjects fall back to the general programming track.
        .unwrap_or(&CATALOG[0])
}

fn phase(
    number: u32,
    title: &str,
    description: String,
    duration: &str,
    min_weeks: u32,
    resources: &[Resource],
    objectives: Vec<String>,
) -> Phase {
    Phase {
        phase: number,
        title: title.to_string(),
        description,
        duration: duration.to_string(),
        resources: resources.iter().take(3).cloned().collect(),
        learning_objectives: objectives,
        min_weeks,
    }
}

/// Generate a phased plan for the requested subject and skill range.
pub fn generate_learning_path(request: &LearningPathRequest) -> LearningPath {
    let catalog = match_subject(&request.subject);
    let mut phases = Vec::new();
    let mut number = 1;

    if request.current_skill_level == SkillLevel::Beginner && !catalog.beginner.is_empty() {
        phases.push(phase(
            number,
            "Foundation Phase",
            format!("Build strong fundamentals in {}", catalog.subject),
            "4-8 weeks",
            4,
            catalog.beginner,
            vec![
                format!("Understand basic {} concepts", catalog.subject),
                "Complete hands-on exercises".to_string(),
                "Build first project".to_string(),
            ],
        ));
        number += 1;
    }

    if matches!(
        request.target_skill_level,
        SkillLevel::Intermediate | SkillLevel::Advanced
    ) && !catalog.intermediate.is_empty()
    {
        phases.push(phase(
            number,
            "Skill Development Phase",
            format!("Develop intermediate {} skills", catalog.subject),
            "6-12 weeks",
            6,
            catalog.intermediate,
            vec![
                format!("Master intermediate {} concepts", catalog.subject),
                "Work on real-world projects".to_string(),
                "Learn best practices".to_string(),
            ],
        ));
        number += 1;
    }

    if request.target_skill_level == SkillLevel::Advanced && !catalog.advanced.is_empty() {
        phases.push(phase(
            number,
            "Mastery Phase",
            format!("Achieve advanced proficiency in {}", catalog.subject),
            "8-16 weeks",
            8,
            catalog.advanced,
            vec![
                format!("Master advanced {} concepts", catalog.subject),
                "Contribute to open source projects".to_string(),
                "Mentor others".to_string(),
            ],
        ));
    }

    let total_weeks: u32 = phases.iter().map(|p| p.min_weeks).sum();
    let total_resources = phases.iter().map(|p| p.resources.len()).sum();

    LearningPath {
        subject: catalog.subject,
        skill_progression: format!(
            "{:?} -> {:?}",
            request.current_skill_level, request.target_skill_level
        )
        .to_lowercase(),
        learning_style_accommodations: accommodations(request),
        phases,
        study_schedule: StudySchedule {
            time_commitment: request.time_commitment.clone(),
            timeline: request.timeline.clone(),
            recommended_pace: "3-4 hours per week for steady progress",
        },
        estimated_timeline: format!("{} weeks ({} months)", total_weeks, total_weeks / 4),
        total_resources,
    }
}

fn accommodations(request: &LearningPathRequest) -> Vec<String> {
    let mut notes = Vec::new();
    match request.learning_style {
        LearningStyle::Visual => {
            notes.push("Focus on video tutorials and visual documentation".to_string());
        }
        LearningStyle::Auditory => {
            notes.push("Include podcasts and audio-based learning materials".to_string());
        }
        LearningStyle::Kinesthetic => {
            notes.push("Emphasize hands-on projects and coding practice".to_string());
        }
        LearningStyle::Reading | LearningStyle::Mixed => {}
    }
    if request.learning_goals.contains(&LearningGoal::CareerChange) {
        notes.push("Include portfolio projects and networking opportunities".to_string());
    }
    if request.learning_goals.contains(&LearningGoal::Certification) {
        notes.push("Focus on certification-aligned materials and practice exams".to_string());
    }
    notes
}
