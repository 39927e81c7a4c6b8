/// Builder-style setter for request fields: `setter!(date: NaiveDate)`
macro_rules! setter {
    ($field:ident : $ty:ty) => {
        pub fn $field<T>(mut self, $field: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field = $field.into();
            self
        }
    };
}

pub(crate) use setter;
