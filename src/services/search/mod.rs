pub mod criteria;
pub mod pagination;

pub use criteria::{SearchCriteria, SearchPolicy, SearchRequest};
pub use pagination::{Candidate, PageResult, paginate};
