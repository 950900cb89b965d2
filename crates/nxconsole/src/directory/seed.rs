//! Bundled company list.

use super::{city_from_address, Company, Directory};

const COMPANIES: &[(&str, &str)] = &[
    ("ABL생명", "서울특별시 영등포구 의사당대로 147 (여의도동, 에이비엘타워)"),
    ("DB INC", "서울특별시 강남구 역삼로 205 (역삼동)"),
    ("DB금융투자(목동)", "서울특별시 양천구 목동동로 233 (목동)"),
    ("DB금융투자(죽전)", "경기도 용인시 수지구 죽전로 152 (죽전동)"),
    ("DB메탈", "경기도 포천시 소흘읍 이동교로 342"),
    ("DB하이텍", "경기도 안산시 단원구 성곡동 676"),
    ("GKL", "서울특별시 강남구 테헤란로 114 (역삼동)"),
    ("KB국민카드", "서울특별시 중구 남대문로 84 (중구)"),
    ("KG모빌리티", "경기도 평택시 고덕면 고덕국제화로 155"),
    ("Kistep", "충청북도 음성군 맹동면 과학로 15"),
    ("LX공사", "전라북도 전주시 덕진구 기지로 120 (중동, 한국국토정보공사 본사)"),
    ("NHN KCP", "경기도 성남시 분당구 대왕판교로 644번길 49 (삼평동)"),
    ("NH투자증권", "서울특별시 영등포구 여의나루로 4 (여의도동)"),
    ("NS홈쇼핑", "서울특별시 영등포구 여의도동 23-5"),
    ("PTKorea", "서울특별시 강남구 강남대로 298 (역삼동)"),
    ("고려대학교", "서울특별시 성북구 안암로 145 (안암동)"),
    ("동국대학교", "서울특별시 중구 필동로 1길 30 (필동)"),
    ("동신대학교", "전라남도 나주시 건재로 185"),
    ("신한대학교", "경기도 의정부시 호암로 95 (호암동)"),
    ("인하대학교", "인천광역시 미추홀구 인하로 100 (용현동)"),
    ("한양대학교", "서울특별시 성동구 왕십리로 222 (행당동)"),
    ("고대병원", "서울특별시 성북구 고려대로 73 (안암동)"),
    ("일산병원", "경기도 고양시 일산서구 주화로 100"),
    ("골프존", "서울특별시 강남구 테헤란로 534 (대치동)"),
    ("공정거래위원회", "세종특별자치시 한누리대로 402 (어진동)"),
    ("국민연금공단", "전라북도 전주시 덕진구 기지로 180"),
    ("부산시청", "부산광역시 연제구 중앙대로 1001"),
    ("서초구청", "서울특별시 서초구 남부순환로 2584 (서초동)"),
    ("안동시청", "경상북도 안동시 축제장길 252"),
    ("인천공항공사", "인천광역시 중구 공항로 424"),
    ("한국부동산원", "대구광역시 동구 동부로 94"),
    ("한국소비자원", "충청북도 음성군 맹동면 원중로 54"),
    ("한국지방재정공제회", "서울특별시 중구 세종대로 124"),
    ("한국지역난방공사", "경기도 성남시 분당구 판교역로 688"),
    ("교보AXA(DC)", "서울특별시 종로구 종로 1 (교보생명빌딩)"),
    ("교보AXA(DR)", "서울특별시 종로구 종로 1 (교보생명빌딩)"),
    ("하나자산신탁", "서울특별시 중구 을지로 66"),
    ("하나펀드서비스", "서울특별시 중구 을지로 66 (을지로2가, 하나금융그룹 명동사옥) 10층, 11층"),
    ("한국투자공사", "서울특별시 영등포구 여의나루로 4 (여의도동)"),
    ("현대해상", "서울특별시 종로구 종로 80 (종로2가)"),
    ("흥국생명", "서울특별시 중구 칠패로 4 (중림동)"),
    ("비상교육", "서울특별시 구로구 디지털로 33길 12 (구로동)"),
    ("한국화장품", "서울특별시 강남구 삼성로 96길 23"),
    ("트라이코코리아", "서울특별시 강남구 테헤란로 518"),
    ("노벨리스코리아", "경기도 평택시 포승읍 평택항로 184"),
    ("대웅제약", "서울특별시 동대문구 천호대로 447 (청량리동)"),
    ("두산중공업", "경상남도 창원시 성산구 두산볼바르 22"),
    ("동부건설", "서울특별시 중구 을지로 170 (을지로4가)"),
    ("원익IPS", "경기도 평택시 청북읍 백봉산단로 35"),
    ("원익머트리얼즈", "경기도 평택시 청북읍 기업도시로 17-26"),
    ("진화기술공사", "서울특별시 강남구 논현로 518"),
    ("피닉스다트", "경기도 화성시 향남읍 발안공단로 88"),
    ("한국조선해양기자재연구원", "부산광역시 강서구 과학산단1로 32"),
    ("금호타이어", "경기도 용인시 수지구 신수로 39"),
    ("유피케미칼", "충청북도 음성군 맹동면 두성로 187"),
    ("이노그리드", "서울특별시 구로구 디지털로 26길 61"),
    ("세영통신", "서울특별시 금천구 가산디지털1로 168"),
    ("신한DS", "서울특별시 중구 세종대로 9길 42"),
    ("우아한형제들", "서울특별시 송파구 위례성대로 2 (방이동)"),
    ("포크빌", "전라북도 고창군 공음면 학원농공단지길 5"),
    ("롯데정보통신", "서울특별시 금천구 가산디지털1로 9 (가산동)"),
    ("파라다이스", "부산광역시 해운대구 해운대해변로 296"),
    ("블랭크코퍼레이션", "서울특별시 강남구 테헤란로 108길 30"),
    ("블랭크코퍼레이션(studio)", "서울특별시 강남구 테헤란로 108길 30"),
    ("홈플러스", "서울특별시 강서구 공항대로 467"),
    ("비스트라코리아", "서울특별시 강남구 테헤란로 518"),
    ("학술정보원(Keris)", "대구광역시 북구 대학로 80"),
    ("대한지방행정공제회", "서울특별시 중구 세종대로 110"),
    ("스마트그리드사업단", "경기도 성남시 분당구 판교로 255번길 25"),
    ("교통정보센터(고양시)", "경기도 고양시 일산동구 중앙로 1036"),
    ("교통정보센터(김포시)", "경기도 김포시 사우중로 100"),
    ("교통정보센터(성남시청)", "경기도 성남시 중원구 성남대로 997"),
    ("교통정보센터(안성)", "경기도 안성시 시청길 25"),
    ("김포 교통정보센터", "경기도 김포시 사우중로 100"),
    ("성남 정보센터", "경기도 성남시 중원구 성남대로 997"),
];

/// Directory over the bundled company list.
///
/// Ids are `company-<n>`, numbered from 1 in list order.
#[derive(Debug, Clone)]
pub struct SeedDirectory {
    companies: Vec<Company>,
}

impl SeedDirectory {
    pub fn new() -> Self {
        let companies = COMPANIES
            .iter()
            .enumerate()
            .map(|(index, (name, address))| Company {
                id: format!("company-{}", index + 1),
                name: (*name).to_string(),
                address: (*address).to_string(),
                city: city_from_address(address).to_string(),
            })
            .collect();
        Self { companies }
    }
}

impl Default for SeedDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory for SeedDirectory {
    fn companies(&self) -> &[Company] {
        &self.companies
    }
}
