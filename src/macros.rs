#[macro_export]
macro_rules! map {
    [ $($key:expr => $value:expr),* $(,)? ] => {
        {
            let mut hash_map = FnvHashMap::default();

            $(hash_map.insert($key, $value);)*

            hash_map
        }
    }
}

#[macro_export]
macro_rules! set {
    [ $($value:expr),* $(,)? ] => {
        {
            let mut hash_set = FnvHashSet::default();

            $(hash_set.insert($value);)*

            hash_set
        }
    }
}
