use crate::models::Course;

/// Catalog shown whenever the record-keeping service cannot supply one.
pub fn bundled_courses() -> Vec<Course> {
    vec![
        Course {
            id: "1".to_string(),
            title: "Advanced React Architecture".to_string(),
            description: "Learn how to scale large applications with modern React patterns, performance optimization, and custom hooks.".to_string(),
            teacher_id: "t1".to_string(),
            teacher_name: "Sarah Jenkins".to_string(),
            thumbnail: "https://picsum.photos/seed/react/800/450".to_string(),
            category: "Development".to_string(),
            language: "en".to_string(),
            is_group: true,
            price: 49.99,
            rating: 4.8,
            enrolled_count: 1240,
            next_session: Some("2023-11-25T15:00:00Z".to_string()),
            zoom_link: Some("https://zoom.us/j/mock-meeting-1".to_string()),
        },
        Course {
            id: "2".to_string(),
            title: "Data Science Fundamentals".to_string(),
            description: "Master Python, Pandas, and Scikit-Learn to start your journey into data analysis and machine learning.".to_string(),
            teacher_id: "t2".to_string(),
            teacher_name: "Dr. Alan Turing".to_string(),
            thumbnail: "https://picsum.photos/seed/data/800/450".to_string(),
            category: "Data Science".to_string(),
            language: "ru".to_string(),
            is_group: true,
            price: 39.99,
            rating: 4.9,
            enrolled_count: 850,
            next_session: Some("2023-11-26T10:00:00Z".to_string()),
            zoom_link: Some("https://zoom.us/j/mock-meeting-2".to_string()),
        },
        Course {
            id: "3".to_string(),
            title: "Personalized UI/UX Coaching".to_string(),
            description: "One-on-one sessions focused on building your portfolio and mastering Figma with industry veterans.".to_string(),
            teacher_id: "t3".to_string(),
            teacher_name: "Elena Rossi".to_string(),
            thumbnail: "https://picsum.photos/seed/design/800/450".to_string(),
            category: "Design".to_string(),
            language: "en".to_string(),
            is_group: false,
            price: 120.0,
            rating: 5.0,
            enrolled_count: 15,
            next_session: Some("2023-11-27T14:30:00Z".to_string()),
            zoom_link: Some("https://zoom.us/j/mock-meeting-3".to_string()),
        },
        Course {
            id: "4".to_string(),
            title: "O'zbek tilida Dasturlash".to_string(),
            description: "Dasturlash asoslarini o'zbek tilida professional darajada o'rganing. Front-end va Back-end asoslari.".to_string(),
            teacher_id: "t4".to_string(),
            teacher_name: "Abdurahmon Azizov".to_string(),
            thumbnail: "https://picsum.photos/seed/uzbek/800/450".to_string(),
            category: "Development".to_string(),
            language: "uz".to_string(),
            is_group: true,
            price: 29.99,
            rating: 4.7,
            enrolled_count: 1500,
            next_session: Some("2023-11-28T09:00:00Z".to_string()),
            zoom_link: Some("https://zoom.us/j/mock-meeting-5".to_string()),
        },
    ]
}
