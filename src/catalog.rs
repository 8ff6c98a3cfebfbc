//! Built-in sample catalog and search vocabularies.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Biomaterial, MaterialProperties, Price, TemperatureRange};

/// Known material categories
pub const CATEGORIES: &[&str] = &[
    "생분해성 플라스틱",
    "천연 생체재료",
    "하이드로겔",
    "바이오세라믹",
    "금속 생체재료",
    "복합재료",
    "배양세포주",
];

/// Known application tags
pub const APPLICATIONS: &[&str] = &[
    "의료용 임플란트",
    "조직공학",
    "약물전달",
    "상처치료",
    "치과재료",
    "정형외과",
    "화장품",
    "포장재",
    "3D 프린팅",
    "의료기기",
];

/// Search terms suggested before the user types anything
pub const POPULAR_KEYWORDS: &[&str] = &[
    "bacillus subtilis",
    "Cancer",
    "Bacillus",
    "Covid",
    "bifidobacterium",
    "사과",
    "CAR-NK",
];

/// Registry material clusters and their English slugs
pub const CLUSTERS: &[(&str, &str)] = &[
    ("인체유래물", "human-derived"),
    ("줄기세포", "stem-cell"),
    ("병원체", "pathogen"),
    ("배양세포", "cell-culture"),
    ("모델동물", "model-animal"),
    ("뇌", "brain"),
    ("미생물", "microorganism"),
    ("천연물", "natural-product"),
    ("합성화합물", "synthetic-compound"),
    ("축산", "livestock"),
    ("종자", "seed"),
    ("해양생물", "marine-life"),
    ("수산생물", "aquatic-life"),
    ("야생생물", "wildlife"),
];

/// Slug for a cluster name; unknown names pass through unchanged
pub fn cluster_slug(cluster: &str) -> &str {
    CLUSTERS
        .iter()
        .find(|(name, _)| *name == cluster)
        .map(|(_, slug)| *slug)
        .unwrap_or(cluster)
}

/// Registry query text restricting a search to one cluster
pub fn cluster_query(cluster: &str) -> String {
    format!("cluster:{}", cluster_slug(cluster))
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn physical(
    biodegradable: bool,
    tensile_strength: f64,
    elastic_modulus: f64,
    degradation_time: &str,
    temperature: (f64, f64),
) -> MaterialProperties {
    MaterialProperties {
        biodegradable,
        biocompatible: true,
        tensile_strength: Some(tensile_strength),
        elastic_modulus: Some(elastic_modulus),
        degradation_time: Some(degradation_time.to_string()),
        temperature: Some(TemperatureRange {
            min: temperature.0,
            max: temperature.1,
        }),
    }
}

struct Entry {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    subcategory: &'static str,
    description: &'static str,
    properties: MaterialProperties,
    applications: &'static [&'static str],
    suppliers: &'static [&'static str],
    certification: &'static [&'static str],
    image: &'static str,
    price: (f64, &'static str),
    in_stock: bool,
    created: (i32, u32, u32),
    updated: (i32, u32, u32),
}

impl From<Entry> for Biomaterial {
    fn from(e: Entry) -> Self {
        Biomaterial {
            id: e.id.to_string(),
            name: e.name.to_string(),
            category: e.category.to_string(),
            subcategory: e.subcategory.to_string(),
            description: e.description.to_string(),
            properties: e.properties,
            applications: strings(e.applications),
            suppliers: strings(e.suppliers),
            certification: strings(e.certification),
            image_url: Some(e.image.to_string()),
            data_sheet: None,
            price: Some(Price::new(e.price.0, e.price.1, "KRW")),
            in_stock: e.in_stock,
            created_at: date(e.created.0, e.created.1, e.created.2),
            updated_at: date(e.updated.0, e.updated.1, e.updated.2),
        }
    }
}

/// The fixed sample catalog, in display order
pub fn sample_biomaterials() -> Vec<Biomaterial> {
    vec![
        Entry {
            id: "1",
            name: "PLA (폴리락트산)",
            category: "생분해성 플라스틱",
            subcategory: "열가소성 수지",
            description: "옥수수, 사탕수수 등의 식물 자원에서 추출한 젖산으로 만든 생분해성 플라스틱으로, 의료용 임플란트와 포장재에 널리 사용됩니다.",
            properties: physical(true, 50.0, 3.5, "6-24개월", (-20.0, 60.0)),
            applications: &["의료용 임플란트", "일회용 포장재", "3D 프린팅", "의료용 봉합사"],
            suppliers: &["NatureWorks", "Total Corbion", "한국생분해플라스틱"],
            certification: &["FDA 승인", "CE 마크", "ISO 17088"],
            image: "/images/pla.jpg",
            price: (3500.0, "kg당"),
            in_stock: true,
            created: (2024, 1, 15),
            updated: (2024, 1, 20),
        },
        Entry {
            id: "2",
            name: "PCL (폴리카프로락톤)",
            category: "생분해성 플라스틱",
            subcategory: "열가소성 수지",
            description: "우수한 생체적합성과 조절 가능한 분해속도를 가진 합성 생분해성 폴리머로, 조직공학과 약물전달 시스템에 활용됩니다.",
            properties: physical(true, 25.0, 0.4, "12-24개월", (-30.0, 70.0)),
            applications: &["조직공학 스캐폴드", "약물전달시스템", "생체재료", "의료용 필름"],
            suppliers: &["Perstorp", "Daicel", "삼양사"],
            certification: &["FDA 승인", "USP Class VI", "ISO 10993"],
            image: "/images/pcl.jpg",
            price: (12000.0, "kg당"),
            in_stock: true,
            created: (2024, 1, 10),
            updated: (2024, 1, 18),
        },
        Entry {
            id: "3",
            name: "콜라겐",
            category: "천연 생체재료",
            subcategory: "단백질 기반",
            description: "동물의 결합조직에서 추출한 천연 단백질로, 뛰어난 생체적합성과 생분해성을 가지며 의료 및 화장품 분야에서 광범위하게 사용됩니다.",
            properties: physical(true, 0.5, 0.001, "1-3개월", (2.0, 37.0)),
            applications: &["상처치료", "피부재생", "화장품", "관절치료", "치과재료"],
            suppliers: &["Integra LifeSciences", "Collagen Matrix", "메디젠바이오"],
            certification: &["FDA 승인", "CE 마크", "GMP"],
            image: "/images/collagen.jpg",
            price: (45000.0, "g당"),
            in_stock: true,
            created: (2024, 1, 5),
            updated: (2024, 1, 22),
        },
        Entry {
            id: "4",
            name: "키토산",
            category: "천연 생체재료",
            subcategory: "다당류 기반",
            description: "게, 새우 등의 갑각류 껍질에서 추출한 천연 다당류로, 항균성과 지혈효과가 뛰어나 의료용 드레싱과 약물전달에 사용됩니다.",
            properties: physical(true, 100.0, 2.0, "2-6개월", (-10.0, 80.0)),
            applications: &["의료용 드레싱", "약물전달", "항균 코팅", "수처리", "식품보존"],
            suppliers: &["Primex", "Kitozyme", "해양바이오"],
            certification: &["FDA 승인", "GRAS 인증", "ISO 22718"],
            image: "/images/chitosan.jpg",
            price: (25000.0, "kg당"),
            in_stock: true,
            created: (2024, 1, 12),
            updated: (2024, 1, 19),
        },
        Entry {
            id: "5",
            name: "하이드로겔 (PEG 기반)",
            category: "하이드로겔",
            subcategory: "합성 하이드로겔",
            description: "높은 수분 보유력과 우수한 생체적합성을 가진 폴리에틸렌글리콜 기반 하이드로겔로, 조직공학과 약물전달 분야에 활용됩니다.",
            properties: physical(true, 0.1, 0.01, "1-6개월", (4.0, 37.0)),
            applications: &["조직공학", "약물전달", "세포배양", "상처치료", "안과용"],
            suppliers: &["Sigma-Aldrich", "Merck", "바이오니아"],
            certification: &["USP Class VI", "ISO 10993", "CE 마크"],
            image: "/images/hydrogel.jpg",
            price: (180000.0, "kg당"),
            in_stock: false,
            created: (2024, 1, 8),
            updated: (2024, 1, 21),
        },
        Entry {
            id: "6",
            name: "바이오세라믹 (하이드록시아파타이트)",
            category: "바이오세라믹",
            subcategory: "인산칼슘 기반",
            description: "골조직과 유사한 화학적 조성을 가진 바이오세라믹으로, 뛰어난 골전도성과 생체적합성을 제공하여 정형외과 임플란트에 사용됩니다.",
            properties: physical(false, 100.0, 80.0, "비분해성", (-50.0, 1000.0)),
            applications: &["정형외과 임플란트", "치과 임플란트", "골이식재", "코팅재료"],
            suppliers: &["Zimmer Biomet", "Straumann", "오스템임플란트"],
            certification: &["FDA 승인", "CE 마크", "ISO 13485"],
            image: "/images/hydroxyapatite.jpg",
            price: (85000.0, "kg당"),
            in_stock: true,
            created: (2024, 1, 14),
            updated: (2024, 1, 20),
        },
        Entry {
            id: "7",
            name: "HeLa 세포주",
            category: "배양세포주",
            subcategory: "인간 암세포주",
            description: "자궁경부암에서 유래한 인간 불멸화 세포주로, 생물학 연구에서 가장 널리 사용되는 세포주 중 하나입니다.",
            properties: MaterialProperties::flags(false, true),
            applications: &["암 연구", "세포생물학", "바이러스 연구", "약물 스크리닝", "백신 개발"],
            suppliers: &["ATCC", "KCLB", "한국세포주은행"],
            certification: &["ATCC 인증", "STR 프로파일링", "Mycoplasma-free"],
            image: "/images/hela.jpg",
            price: (350000.0, "vial당"),
            in_stock: true,
            created: (2024, 1, 16),
            updated: (2024, 1, 23),
        },
        Entry {
            id: "8",
            name: "CHO 세포주",
            category: "배양세포주",
            subcategory: "동물 세포주",
            description: "중국 햄스터 난소 세포에서 유래한 세포주로, 단백질 생산 및 바이오의약품 제조에 광범위하게 사용됩니다.",
            properties: MaterialProperties::flags(false, true),
            applications: &["단백질 생산", "바이오의약품 제조", "항체 생산", "백신 생산", "세포치료제"],
            suppliers: &["ATCC", "Thermo Fisher", "셀진바이오"],
            certification: &["FDA 승인", "GMP 적합", "ICH 가이드라인"],
            image: "/images/cho.jpg",
            price: (420000.0, "vial당"),
            in_stock: true,
            created: (2024, 1, 17),
            updated: (2024, 1, 24),
        },
        Entry {
            id: "9",
            name: "HEK293 세포주",
            category: "배양세포주",
            subcategory: "인간 세포주",
            description: "인간 배아 신장 세포에서 유래한 세포주로, 유전자 발현 연구와 바이러스 생산에 널리 사용됩니다.",
            properties: MaterialProperties::flags(false, true),
            applications: &["유전자 발현", "바이러스 생산", "단백질 발현", "형질전환 연구", "백신 개발"],
            suppliers: &["ATCC", "Invitrogen", "코스모진테크"],
            certification: &["ATCC 인증", "Mycoplasma 음성", "STR 검증"],
            image: "/images/hek293.jpg",
            price: (380000.0, "vial당"),
            in_stock: true,
            created: (2024, 1, 18),
            updated: (2024, 1, 25),
        },
        Entry {
            id: "10",
            name: "iPSC (유도만능줄기세포)",
            category: "배양세포주",
            subcategory: "줄기세포",
            description: "성체 세포를 역분화시켜 만든 유도만능줄기세포로, 재생의학과 질병 모델링에 혁신적인 도구입니다.",
            properties: MaterialProperties::flags(false, true),
            applications: &["재생의학", "질병 모델링", "약물 스크리닝", "세포치료", "조직공학"],
            suppliers: &["RIKEN", "Thermo Fisher", "차바이오텍"],
            certification: &["GMP 등급", "Pluripotency 검증", "Karyotype 정상"],
            image: "/images/ipsc.jpg",
            price: (850000.0, "vial당"),
            in_stock: false,
            created: (2024, 1, 19),
            updated: (2024, 1, 26),
        },
        Entry {
            id: "11",
            name: "Bacillus subtilis (바실러스 서브틸리스)",
            category: "미생물",
            subcategory: "세균",
            description: "토양이나 장내에 널리 존재하는 그람 양성 세균으로, 효소 생산 및 프로바이오틱스로 산업적으로 중요하게 사용됩니다.",
            properties: MaterialProperties::flags(true, true),
            applications: &["프로바이오틱스", "산업용 효소 생산", "고초균", "농업용 미생물", "환경 정화"],
            suppliers: &["ATCC", "KCTC", "DSM"],
            certification: &["GRAS 인증", "Non-GMO"],
            image: "/images/bacillus.jpg",
            price: (150000.0, "strain당"),
            in_stock: true,
            created: (2024, 2, 1),
            updated: (2024, 2, 1),
        },
    ]
    .into_iter()
    .map(Biomaterial::from)
    .collect()
}
