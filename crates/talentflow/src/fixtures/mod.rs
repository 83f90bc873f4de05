//! Seedable fixture generator for jobs, candidates and assessments.
//!
//! Every field is a uniform draw from a small vocabulary or range. With the
//! same seed and reference time the generator produces identical records.

pub mod vocab;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::config::FixtureConfig;
use crate::model::{
    Assessment, AssessmentStatus, AssessmentType, Candidate, HiringManager, Job, JobPriority,
    JobStatus, Question, QuestionType, Salary, Stage,
};
use vocab::*;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Records produced by a seeding run, ids numbered from 1 per collection.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub jobs: Vec<Job>,
    pub candidates: Vec<Candidate>,
    pub assessments: Vec<Assessment>,
}

pub struct FixtureGenerator<R: Rng = StdRng> {
    rng: R,
    now: DateTime<Utc>,
}

impl FixtureGenerator<StdRng> {
    /// Reproducible generator.
    pub fn seeded(seed: u64, now: DateTime<Utc>) -> Self {
        Self::new(StdRng::seed_from_u64(seed), now)
    }

    /// Generator seeded from the operating system.
    pub fn from_entropy(now: DateTime<Utc>) -> Self {
        Self::new(StdRng::from_os_rng(), now)
    }
}

impl<R: Rng> FixtureGenerator<R> {
    pub fn new(rng: R, now: DateTime<Utc>) -> Self {
        Self { rng, now }
    }

    /// Hands the PRNG back so later draws continue the same stream.
    pub fn into_rng(self) -> R {
        self.rng
    }

    /// Jobs first, then a random batch of candidates per job, then
    /// independent assessments.
    pub fn seed(&mut self, config: &FixtureConfig) -> SeedData {
        let mut data = SeedData::default();

        for i in 0..config.jobs {
            data.jobs.push(self.job(&(i + 1).to_string()));
        }

        let mut next_candidate = 1usize;
        for job_index in 0..data.jobs.len() {
            let count = self
                .rng
                .random_range(config.candidates_min..=config.candidates_max);
            let job_id = data.jobs[job_index].id.clone();
            for _ in 0..count {
                let candidate = self.candidate(&next_candidate.to_string(), &job_id);
                data.candidates.push(candidate);
                next_candidate += 1;
            }
        }

        for i in 0..config.assessments {
            data.assessments.push(self.assessment(&(i + 1).to_string()));
        }

        log::debug!(
            "Generated {} jobs, {} candidates, {} assessments",
            data.jobs.len(),
            data.candidates.len(),
            data.assessments.len()
        );

        data
    }

    pub fn job(&mut self, id: &str) -> Job {
        let created_at = self.days_ago(90);
        let updated_at = self.days_ago(30).max(created_at);
        let requirement_count = self.rng.random_range(3..=8);
        let requirements = (0..requirement_count)
            .map(|_| format!("Experience with {}", self.pick(REQUIREMENT_TECH)))
            .collect();

        Job {
            id: id.to_string(),
            title: self.pick(JOB_TITLES).to_string(),
            department: self.pick(DEPARTMENTS).to_string(),
            location: self.pick(JOB_LOCATIONS).to_string(),
            employment_type: self.pick(EMPLOYMENT_TYPES).to_string(),
            status: self.pick_copy(&JobStatus::ALL, JobStatus::Active),
            priority: self.pick_copy(&JobPriority::ALL, JobPriority::Medium),
            description: self.text(3),
            requirements,
            salary: Salary {
                min: self.rng.random_range(60_000..=120_000),
                max: self.rng.random_range(120_000..=200_000),
                currency: "USD".to_string(),
            },
            hiring_manager: self.hiring_manager(),
            created_at,
            updated_at,
        }
    }

    pub fn candidate(&mut self, id: &str, job_id: &str) -> Candidate {
        let (first_name, last_name) = self.name();
        let applied_at = self.days_ago(60);
        let last_activity = self.days_ago(7).max(applied_at);
        let skill_count = self.rng.random_range(3..=10);
        let skills = (0..skill_count)
            .map(|_| self.pick(SKILLS).to_string())
            .collect();

        Candidate {
            id: id.to_string(),
            email: email_for(first_name, last_name),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone: format!(
                "+1-{}-{}-{}",
                self.rng.random_range(200..=999),
                self.rng.random_range(100..=999),
                self.rng.random_range(1000..=9999)
            ),
            avatar: self.avatar_url(),
            location: self.pick(CANDIDATE_CITIES).to_string(),
            experience: self.rng.random_range(0..=15),
            current_role: self.pick(CURRENT_ROLES).to_string(),
            current_company: self.pick(COMPANIES).to_string(),
            stage: self.pick_copy(&Stage::ALL, Stage::Applied),
            job_id: job_id.to_string(),
            applied_at,
            last_activity,
            rating: self.rng.random_range(1..=5),
            notes: self.text(1),
            skills,
            resume_url: "https://example.com/resume.pdf".to_string(),
            linkedin_url: format!(
                "https://linkedin.com/in/user{}",
                self.rng.random_range(1000..=9999)
            ),
            source: self.pick(SOURCES).to_string(),
        }
    }

    pub fn assessment(&mut self, id: &str) -> Assessment {
        let question_count = self.rng.random_range(5..=15);
        let questions = (1..=question_count).map(|n| self.question(n)).collect();

        Assessment {
            id: id.to_string(),
            title: self.pick(ASSESSMENT_TITLES).to_string(),
            description: self.text(1),
            kind: self.pick_copy(&AssessmentType::ALL, AssessmentType::Quiz),
            duration: self.rng.random_range(15..=180),
            questions,
            status: self.pick_copy(&AssessmentStatus::ALL, AssessmentStatus::Draft),
            created_at: self.days_ago(30),
        }
    }

    /// A UUID built from generator bytes.
    pub fn uuid(&mut self) -> String {
        uuid::Builder::from_random_bytes(self.rng.random())
            .into_uuid()
            .to_string()
    }

    fn question(&mut self, id: u32) -> Question {
        let prompt = self.text(1).replacen('.', "?", 1);
        let required = self.rng.random_bool(0.7);
        let options = if self.rng.random_bool(0.5) {
            Some(
                (0..4)
                    .map(|_| {
                        self.text(1)
                            .split(' ')
                            .take(3)
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect(),
            )
        } else {
            None
        };

        Question {
            id,
            kind: self.pick_copy(&QuestionType::ALL, QuestionType::Text),
            question: prompt,
            required,
            options,
        }
    }

    fn hiring_manager(&mut self) -> HiringManager {
        let (first, last) = self.name();
        HiringManager {
            id: self.uuid(),
            name: format!("{} {}", first, last),
            email: email_for(first, last),
            avatar: self.avatar_url(),
        }
    }

    fn name(&mut self) -> (&'static str, &'static str) {
        (self.pick(FIRST_NAMES), self.pick(LAST_NAMES))
    }

    fn avatar_url(&mut self) -> String {
        format!(
            "https://images.unsplash.com/photo-{}?w=40&h=40&fit=crop&crop=face",
            self.rng.random_range(1_500_000_000_000u64..=1_600_000_000_000u64)
        )
    }

    /// `sentences` sentences of 8 to 15 filler words, joined with ". ".
    fn text(&mut self, sentences: usize) -> String {
        let body = (0..sentences)
            .map(|_| {
                let words = self.rng.random_range(8..=15);
                (0..words)
                    .map(|_| self.pick(FILLER_WORDS))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join(". ");
        format!("{}.", body)
    }

    fn days_ago(&mut self, max_days: i64) -> DateTime<Utc> {
        self.now - Duration::milliseconds(self.rng.random_range(0..=max_days * DAY_MS))
    }

    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn pick_copy<T: Copy>(&mut self, items: &[T], fallback: T) -> T {
        items.choose(&mut self.rng).copied().unwrap_or(fallback)
    }
}

fn email_for(first: &str, last: &str) -> String {
    format!("{}.{}@email.com", first.to_lowercase(), last.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn small_config() -> FixtureConfig {
        FixtureConfig {
            jobs: 4,
            candidates_min: 2,
            candidates_max: 6,
            assessments: 3,
        }
    }

    #[test]
    fn test_same_seed_same_fixtures() {
        let a = FixtureGenerator::seeded(42, reference_time()).seed(&small_config());
        let b = FixtureGenerator::seeded(42, reference_time()).seed(&small_config());

        assert_eq!(a.jobs, b.jobs);
        assert_eq!(a.candidates, b.candidates);
        assert_eq!(a.assessments, b.assessments);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = FixtureGenerator::seeded(1, reference_time()).seed(&small_config());
        let b = FixtureGenerator::seeded(2, reference_time()).seed(&small_config());
        assert_ne!(a.jobs, b.jobs);
    }

    #[test]
    fn test_seed_counts_and_links() {
        let config = small_config();
        let data = FixtureGenerator::seeded(7, reference_time()).seed(&config);

        assert_eq!(data.jobs.len(), 4);
        assert_eq!(data.assessments.len(), 3);
        for job in &data.jobs {
            let count = data.candidates.iter().filter(|c| c.job_id == job.id).count();
            assert!((config.candidates_min..=config.candidates_max).contains(&count));
        }

        let ids: Vec<&str> = data.candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.first(), Some(&"1"));
        assert_eq!(
            ids.last().copied(),
            Some(data.candidates.len().to_string().as_str())
        );
    }

    #[test]
    fn test_job_field_ranges() {
        let mut generator = FixtureGenerator::seeded(9, reference_time());
        for i in 0..50 {
            let job = generator.job(&i.to_string());
            assert!(job.salary.is_ordered());
            assert!((3..=8).contains(&job.requirements.len()));
            assert!(job.requirements.iter().all(|r| r.starts_with("Experience with ")));
            assert!(job.updated_at >= job.created_at);
            assert!(job.created_at >= reference_time() - Duration::days(90));
            assert!(job.description.ends_with('.'));
            assert!(job.hiring_manager.email.ends_with("@email.com"));
        }
    }

    #[test]
    fn test_candidate_field_ranges() {
        let mut generator = FixtureGenerator::seeded(11, reference_time());
        for i in 0..50 {
            let c = generator.candidate(&i.to_string(), "3");
            assert_eq!(c.job_id, "3");
            assert!(c.experience <= 15);
            assert!((1..=5).contains(&c.rating));
            assert!((3..=10).contains(&c.skills.len()));
            assert!(c.last_activity >= c.applied_at);
            assert!(c.phone.starts_with("+1-"));
            assert_eq!(
                c.email,
                format!(
                    "{}.{}@email.com",
                    c.first_name.to_lowercase(),
                    c.last_name.to_lowercase()
                )
            );
        }
    }

    #[test]
    fn test_assessment_questions_numbered() {
        let mut generator = FixtureGenerator::seeded(13, reference_time());
        let assessment = generator.assessment("1");

        assert!((5..=15).contains(&assessment.questions.len()));
        assert!((15..=180).contains(&assessment.duration));
        for (i, q) in assessment.questions.iter().enumerate() {
            assert_eq!(q.id as usize, i + 1);
            assert!(q.question.contains('?'));
            if let Some(options) = &q.options {
                assert_eq!(options.len(), 4);
                assert!(options.iter().all(|o| o.split(' ').count() <= 3));
            }
        }
    }

    #[test]
    fn test_uuid_is_reproducible() {
        let a = FixtureGenerator::seeded(5, reference_time()).uuid();
        let b = FixtureGenerator::seeded(5, reference_time()).uuid();
        assert_eq!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn test_entropy_seeded_generator_respects_sizes() {
        let data = FixtureGenerator::from_entropy(reference_time()).seed(&small_config());

        assert_eq!(data.jobs.len(), 4);
        assert_eq!(data.assessments.len(), 3);
        assert!((8..=24).contains(&data.candidates.len()));
    }
}
