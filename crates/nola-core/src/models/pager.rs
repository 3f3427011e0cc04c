use serde::{Deserialize, Serialize};

/// One page of a listing. A requested size of 0 asks the server for everything.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pager<T> {
    pub page: u32,
    pub size: u32,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub total_data: u64,
    pub total_page: u32,
}

impl<T> Pager<T> {
    pub fn is_last_page(&self) -> bool {
        self.page >= self.total_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pager() {
        let json = r#"{"page":1,"size":2,"data":[7,8],"totalData":5,"totalPage":3}"#;
        let pager: Pager<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(pager.data, vec![7, 8]);
        assert_eq!(pager.total_data, 5);
        assert!(!pager.is_last_page());
    }
}
