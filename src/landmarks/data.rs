//! Built-in footprint and landmark tables.
//!
//! Footprint corners were surveyed against the palace map; the declaration
//! order of `builtin_footprints` is the resolver's scan order and must not be
//! reshuffled, since overlapping buffered rectangles resolve to the first
//! entry.

use crate::models::{Footprint, GeoPoint, LandmarkInfo};

/// Building footprints inside Gyeongbokgung, NW/SE corner pairs.
pub fn builtin_footprints() -> Vec<Footprint> {
    fn fp(
        id: &'static str,
        name: &'static str,
        name_localized: &'static str,
        nw: (f64, f64),
        se: (f64, f64),
    ) -> Footprint {
        Footprint {
            id,
            name,
            name_localized,
            northwest: GeoPoint::new(nw.0, nw.1),
            southeast: GeoPoint::new(se.0, se.1),
        }
    }

    vec![
        fp(
            "eungjidang",
            "Eungjidang",
            "응지당",
            (37.579595432157966, 126.97667876079947),
            (37.57955041200325, 126.9768287778653),
        ),
        fp(
            "gyeongseongjeon",
            "Gyeongseongjeon",
            "경성전",
            (37.579534628470896, 126.97674670564773),
            (37.5793566949806, 126.97681185646736),
        ),
        fp(
            "gangnyeongjeon",
            "Gangnyeongjeon",
            "강녕전",
            (37.57947608222901, 126.97684012187166),
            (37.57938156638848, 126.97729581968161),
        ),
        fp(
            "heumgyeonggak",
            "Heumgyeonggak",
            "흠경각",
            (37.57972153988065, 126.97652022734192),
            (37.5796810316051, 126.97670420635653),
        ),
        fp(
            "gyotaejeon",
            "Gyotaejeon",
            "교태전",
            (37.57989055382053, 126.97691358021297),
            (37.57982529770065, 126.97725323109862),
        ),
        fp(
            "sajeongjeon",
            "Sajeongjeon",
            "사정전",
            (37.579045873149205, 126.97691950147181),
            (37.57898059787739, 126.97716009067494),
        ),
        fp(
            "manchunjeon",
            "Manchunjeon",
            "만춘전",
            (37.579057211291925, 126.97731006930693),
            (37.57899192120716, 126.97747707237069),
        ),
        fp(
            "geungjeongjeon",
            "Geungjeongjeon",
            "긍정전",
            (37.57881379918469, 126.97657428653042),
            (37.57796927076278, 126.9773613427869),
        ),
        fp(
            "gyejodang",
            "Gyejodang",
            "계조당",
            (37.57794005256122, 126.97769814362223),
            (37.57773738094997, 126.97797556142645),
        ),
    ]
}

/// Footprint id → landmark id pairs. Ids absent from this table map to
/// themselves.
pub fn builtin_remap() -> Vec<(&'static str, &'static str)> {
    vec![
        ("eungjidang", "eungjidang"),
        ("gyeongseongjeon", "gyeongseungjeon"),
        ("gangnyeongjeon", "gangnyeongjeon"),
        ("heumgyeonggak", "heumgyeonggak"),
        ("gyotaejeon", "gyotaejeon"),
        ("sajeongjeon", "sajeongjeon"),
        ("manchunjeon", "manchunjeon"),
        ("geungjeongjeon", "geunjeongjeon"),
        ("gyejodang", "gyejodang"),
    ]
}

/// Landmark metadata: the palace buildings plus the free-standing heritage
/// sites served by the main page.
pub fn builtin_landmarks() -> Vec<LandmarkInfo> {
    #[allow(clippy::too_many_arguments)]
    fn lm(
        id: &str,
        name: &str,
        name_localized: &str,
        center: (f64, f64),
        description: &str,
        build_year: &str,
        heritage: &str,
        features: &[&str],
        images: &[&str],
    ) -> LandmarkInfo {
        LandmarkInfo {
            id: id.to_string(),
            name: name.to_string(),
            name_localized: name_localized.to_string(),
            center: GeoPoint::new(center.0, center.1),
            description: description.to_string(),
            build_year: build_year.to_string(),
            heritage: heritage.to_string(),
            features: features.iter().map(|s| s.to_string()).collect(),
            images: images.iter().map(|s| s.to_string()).collect(),
        }
    }

    vec![
        lm(
            "gyeonghoeru",
            "Gyeonghoeru Pavilion",
            "경회루",
            (37.5788, 126.9770),
            "경복궁의 대표적인 누각으로, 연못 위에 세워진 아름다운 건물입니다.",
            "1412년 (태종 12년)",
            "국보 제224호",
            &["2층 누각", "연못 위 건물", "왕실 연회장"],
            &["/image/gyeonghoeru1.jpg", "/image/gyeonghoeru2.jpg"],
        ),
        lm(
            "geunjeongjeon",
            "Geunjeongjeon Hall",
            "근정전",
            (37.5796, 126.9770),
            "경복궁의 정전으로, 조선 왕조의 공식적인 국가 행사가 열리던 곳입니다.",
            "1395년 (태조 4년)",
            "국보 제223호",
            &["정전", "왕의 집무실", "국가 행사장"],
            &["/image/geunjeongjeon1.jpg", "/image/geunjeongjeon2.jpg"],
        ),
        lm(
            "gyeongseungjeon",
            "Gyeongseungjeon Hall",
            "경성전",
            (37.5794, 126.9768),
            "왕이 일상적인 정무를 보던 편전 건물입니다.",
            "1395년 (태조 4년)",
            "보물",
            &["편전", "일상 정무", "실무 공간"],
            &["/image/gyeongseungjeon1.jpg"],
        ),
        lm(
            "sajeongjeon",
            "Sajeongjeon Hall",
            "사정전",
            (37.5801, 126.9770),
            "왕이 일상적인 정무를 보던 편전으로, 근정전보다 작고 실용적인 건물입니다.",
            "1395년 (태조 4년)",
            "보물 제1759호",
            &["편전", "일상 정무", "실무 공간"],
            &["/image/sajeongjeon1.jpg"],
        ),
        lm(
            "gangnyeongjeon",
            "Gangnyeongjeon Hall",
            "강녕전",
            (37.5804, 126.9775),
            "조선시대 왕의 침전으로 사용된 건물입니다.",
            "1395년 (태조 4년)",
            "보물 제1760호",
            &["왕의 침전", "사적 공간", "생활 공간"],
            &["/image/gangnyeongjeon1.jpg"],
        ),
        lm(
            "gyotaejeon",
            "Gyotaejeon Hall",
            "교태전",
            (37.5807, 126.9775),
            "조선시대 왕비의 침전으로 사용된 건물입니다.",
            "1395년 (태조 4년)",
            "보물 제1761호",
            &["왕비의 침전", "꽃담", "여성 공간"],
            &["/image/gyotaejeon1.jpg"],
        ),
        lm(
            "changdeokgung",
            "Changdeokgung Palace",
            "창덕궁",
            (37.5794, 126.9910),
            "조선왕조의 이궁, 유네스코 세계문화유산입니다.",
            "1405년 (태종 5년)",
            "사적 제122호 (유네스코 세계문화유산)",
            &["이궁", "후원", "유네스코 세계문화유산", "자연과의 조화"],
            &["/heritage/changdeokgung.jpg"],
        ),
        lm(
            "deoksugung",
            "Deoksugung Palace",
            "덕수궁",
            (37.5658, 126.9751),
            "대한제국의 황궁입니다.",
            "1593년 (선조 26년)",
            "사적 제124호",
            &["대한제국 황궁", "서양식 건물", "근대사의 현장"],
            &["/heritage/deoksugung.jpg"],
        ),
        lm(
            "changgyeonggung",
            "Changgyeonggung Palace",
            "창경궁",
            (37.5792, 126.9950),
            "조선왕조의 이궁입니다.",
            "1484년 (성종 15년)",
            "사적 제123호",
            &["이궁", "동궐", "왕실 생활공간"],
            &["/heritage/changgyeonggung.jpg"],
        ),
        lm(
            "jongmyo",
            "Jongmyo Shrine",
            "종묘",
            (37.5744, 126.9944),
            "조선왕조 왕과 왕비의 신주를 모신 사당입니다.",
            "1394년 (태조 3년)",
            "사적 제125호 (유네스코 세계문화유산)",
            &["왕실 사당", "종묘제례", "유네스코 세계문화유산"],
            &["/heritage/jongmyo.jpg"],
        ),
        lm(
            "namdaemun",
            "Sungnyemun Gate",
            "숭례문 (남대문)",
            (37.5597, 126.9756),
            "서울 성곽의 정문입니다.",
            "1396년 (태조 5년)",
            "국보 제1호",
            &["서울 성곽", "정문", "국보 제1호"],
            &["/heritage/namdaemun.jpg"],
        ),
        lm(
            "dongdaemun",
            "Heunginjimun Gate",
            "흥인지문 (동대문)",
            (37.5711, 126.9946),
            "서울 성곽의 동문입니다.",
            "1396년 (태조 5년)",
            "보물 제1호",
            &["서울 성곽", "동문", "옹성 구조"],
            &["/heritage/dongdaemun.jpg"],
        ),
        lm(
            "bulguksa",
            "Bulguksa Temple",
            "불국사",
            (35.7898, 129.3320),
            "신라 불교 예술의 걸작입니다.",
            "751년 (경덕왕 10년)",
            "사적 제502호 (유네스코 세계문화유산)",
            &["신라 불교 예술", "다보탑", "석가탑", "유네스코 세계문화유산"],
            &["/heritage/bulguksa.jpg"],
        ),
        lm(
            "seokguram",
            "Seokguram Grotto",
            "석굴암",
            (35.7948, 129.3469),
            "신라 석굴 예술의 최고봉입니다.",
            "751년 (경덕왕 10년)",
            "국보 제24호 (유네스코 세계문화유산)",
            &["석굴 사원", "본존불", "신라 조각 예술", "유네스코 세계문화유산"],
            &["/heritage/seokguram.jpg"],
        ),
        lm(
            "haeinsa",
            "Haeinsa Temple",
            "해인사",
            (35.8014, 128.0981),
            "팔만대장경을 보관한 사찰입니다.",
            "802년 (애장왕 3년)",
            "유네스코 세계문화유산",
            &["팔만대장경", "장경판전", "유네스코 세계문화유산"],
            &["/heritage/haeinsa.jpg"],
        ),
        lm(
            "gyeongbokgung",
            "Gyeongbokgung Palace",
            "경복궁",
            (37.5788, 126.9770),
            "조선왕조 제일의 법궁입니다.",
            "1395년 (태조 4년)",
            "사적 제117호",
            &["조선 법궁", "근정전", "경회루", "향원정"],
            &["/heritage/gyeonghoeru.jpg"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprints_are_valid_rectangles() {
        for fp in builtin_footprints() {
            assert!(
                fp.northwest.lat > fp.southeast.lat,
                "{}: NW lat must be north of SE lat",
                fp.id
            );
            assert!(
                fp.northwest.lon < fp.southeast.lon,
                "{}: NW lon must be west of SE lon",
                fp.id
            );
        }
    }

    #[test]
    fn test_remap_covers_every_footprint() {
        let remap = builtin_remap();
        for fp in builtin_footprints() {
            assert!(remap.iter().any(|(from, _)| *from == fp.id), "{}", fp.id);
        }
    }

    #[test]
    fn test_landmark_ids_are_unique() {
        let landmarks = builtin_landmarks();
        for (i, a) in landmarks.iter().enumerate() {
            for b in &landmarks[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
