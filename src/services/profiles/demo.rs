/*
 * Responsibility
 * - 開発・デモ用の決定的なプロフィール生成 (DB なし)
 * - 時刻は起動時の anchor から導出するので、同じ source からは常に同じ値が返る
 */
use chrono::{DateTime, Duration, Utc};

use super::{ProfileDetail, ProfileSource, ProfileSummary};

const NAMES: [&str; 20] = [
    "Emma Johnson",
    "Sofia Martinez",
    "Isabella Thompson",
    "Olivia Garcia",
    "Ava Rodriguez",
    "Mia Williams",
    "Amelia Brown",
    "Charlotte Davis",
    "Luna Miller",
    "Harper Wilson",
    "Evelyn Moore",
    "Abigail Taylor",
    "Emily Anderson",
    "Elizabeth Thomas",
    "Sofia Jackson",
    "Avery White",
    "Ella Harris",
    "Scarlett Martin",
    "Grace Lee",
    "Aria Clark",
];

const CITIES: [&str; 10] = [
    "Stockholm",
    "Gothenburg",
    "Malmö",
    "Uppsala",
    "Västerås",
    "Örebro",
    "Linköping",
    "Helsingborg",
    "Jönköping",
    "Norrköping",
];

const OCCUPATIONS: [&str; 10] = [
    "Software Engineer",
    "Designer",
    "Teacher",
    "Nurse",
    "Marketing Manager",
    "Data Scientist",
    "Photographer",
    "Architect",
    "Consultant",
    "Student",
];

const BIOS: [&str; 10] = [
    "Hiking on weekends, camera always in the bag",
    "Yoga in the morning, coffee all day",
    "Cooks for friends more often than for myself",
    "Bookworm with a soft spot for long trips",
    "Dog person, planning the next flight already",
    "Painter by night, playlist curator by day",
    "Runs, lifts, and then eats everything",
    "Happiest somewhere without cell coverage",
    "Will dance at any wedding, invited or not",
    "Building a company, collecting passport stamps",
];

const INTERESTS: [[&str; 3]; 10] = [
    ["Photography", "Hiking", "Travel"],
    ["Yoga", "Coffee", "Art"],
    ["Cooking", "Wine", "Music"],
    ["Reading", "Movies", "Adventure"],
    ["Dogs", "Travel", "Beaches"],
    ["Art", "Music", "Concerts"],
    ["Fitness", "Food", "Running"],
    ["Nature", "Camping", "Outdoors"],
    ["Dancing", "Parties", "Fun"],
    ["Business", "Travel", "Innovation"],
];

const NOT_SPECIFIED: &str = "Not specified";

const MIN_AGE: i64 = 22;
const AGE_SPAN: u64 = 15;

/// Deterministic in-memory profile generator.
#[derive(Debug, Clone)]
pub struct DemoProfileSource {
    anchor: DateTime<Utc>,
    capacity: u64,
}

impl DemoProfileSource {
    /// `capacity` is the highest id this source knows about.
    pub fn new(anchor: DateTime<Utc>, capacity: u64) -> Self {
        Self { anchor, capacity }
    }

    fn summary(&self, id: u64) -> ProfileSummary {
        let i = (id - 1) as usize;
        ProfileSummary {
            id,
            name: NAMES[i % NAMES.len()].to_string(),
            age: MIN_AGE + ((id - 1) % AGE_SPAN) as i64,
            city: CITIES[i % CITIES.len()].to_string(),
            primary_photo_url: photo_url(id),
            bio: BIOS[i % BIOS.len()].to_string(),
            occupation: OCCUPATIONS[i % OCCUPATIONS.len()].to_string(),
            interests: INTERESTS[i % INTERESTS.len()]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            is_verified: i % 3 == 0,
            is_online: i % 4 != 0,
            // within the last 24h
            last_active_at: self.anchor - Duration::minutes(((id * 97) % 1440) as i64),
        }
    }
}

impl ProfileSource for DemoProfileSource {
    fn summaries(&self, count: usize) -> Vec<ProfileSummary> {
        let count = (count as u64).min(self.capacity);
        (1..=count).map(|id| self.summary(id)).collect()
    }

    fn detail(&self, id: u64) -> Option<ProfileDetail> {
        if id == 0 || id > self.capacity {
            return None;
        }
        let summary = self.summary(id);
        let is_premium = id % 5 == 0;

        Some(ProfileDetail {
            email: format!("demo.user.{id}@example.com"),
            gender: if id % 2 == 0 { "Female" } else { "Male" }.to_string(),
            preferences: "Everyone".to_string(),
            sexual_orientation: "Straight".to_string(),
            state: "Stockholm County".to_string(),
            country: "Sweden".to_string(),
            photo_urls: (0..3).map(|n| photo_url(id + n * 100)).collect(),
            company: format!("Demo Company {id}"),
            education: "University Graduate".to_string(),
            school: "Stockholm University".to_string(),
            height_cm: 160 + (id % 30) as u32,
            religion: NOT_SPECIFIED.to_string(),
            ethnicity: NOT_SPECIFIED.to_string(),
            smoking_status: "Non-smoker".to_string(),
            drinking_status: "Social drinker".to_string(),
            wants_children: id % 3 == 0,
            has_children: false,
            relationship_type: "Long-term".to_string(),
            languages: vec!["Swedish".to_string(), "English".to_string()],
            hobby_list: summary.interests.join(", "),
            instagram_handle: instagram_handle(&summary.name),
            spotify_top_artists: "Spotify not connected".to_string(),
            is_phone_verified: true,
            is_email_verified: true,
            is_photo_verified: summary.is_verified,
            is_premium,
            subscription_type: if is_premium { "Premium" } else { "Free" }.to_string(),
            created_at: self.anchor - Duration::days(1 + ((id * 53) % 364) as i64),
            summary,
        })
    }
}

fn photo_url(seed: u64) -> String {
    format!("https://picsum.photos/400/600?random={seed}")
}

// "Emma Johnson" -> "@emmajohnson"
fn instagram_handle(name: &str) -> String {
    let handle: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    format!("@{handle}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> DemoProfileSource {
        DemoProfileSource::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap(), 100)
    }

    #[test]
    fn summaries_are_numbered_from_one_and_capped() {
        let src = source();
        let profiles = src.summaries(3);
        assert_eq!(
            profiles.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(src.summaries(1_000).len(), 100);
        assert!(src.summaries(0).is_empty());
    }

    #[test]
    fn ages_cycle_through_22_to_36() {
        let ages: Vec<i64> = source().summaries(16).iter().map(|p| p.age).collect();
        assert_eq!(ages[0], 22);
        assert_eq!(ages[14], 36);
        assert_eq!(ages[15], 22);
    }

    #[test]
    fn same_source_yields_same_profiles() {
        let src = source();
        assert_eq!(src.summaries(50), src.summaries(50));
        assert_eq!(src.detail(7), src.detail(7));
    }

    #[test]
    fn detail_extends_the_matching_summary() {
        let src = source();
        let detail = src.detail(10).unwrap();
        assert_eq!(detail.summary, src.summaries(10)[9]);
        assert_eq!(detail.email, "demo.user.10@example.com");
        assert!(detail.is_premium);
        assert_eq!(detail.subscription_type, "Premium");
        assert_eq!(detail.photo_urls.len(), 3);
    }

    #[test]
    fn detail_carries_lifestyle_and_social_fields() {
        let src = source();
        let detail = src.detail(1).unwrap();
        assert_eq!(detail.instagram_handle, "@emmajohnson");
        assert_eq!(detail.hobby_list, "Photography, Hiking, Travel");
        assert_eq!(detail.religion, "Not specified");
        assert_eq!(detail.smoking_status, "Non-smoker");
        assert!(!detail.has_children);
        assert!(detail.is_phone_verified && detail.is_email_verified);
        // photo verification follows the profile's verified badge
        assert_eq!(detail.is_photo_verified, detail.summary.is_verified);
        assert!(!src.detail(2).unwrap().is_photo_verified);
    }

    #[test]
    fn unknown_ids_have_no_detail() {
        let src = source();
        assert!(src.detail(0).is_none());
        assert!(src.detail(101).is_none());
        assert!(src.detail(100).is_some());
    }

    #[test]
    fn last_active_is_within_a_day_of_the_anchor() {
        let src = source();
        let anchor = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        for p in src.summaries(100) {
            assert!(p.last_active_at <= anchor);
            assert!(anchor - p.last_active_at < Duration::days(1));
        }
    }
}
