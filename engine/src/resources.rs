use type_map::TypeMap;

/// Singletons shared between systems, keyed by type.
pub struct Resources {
    map: TypeMap,
}

impl Default for Resources {
    fn default() -> Self {
        Resources::new()
    }
}

impl Resources {
    pub fn new() -> Self {
        Resources {
            map: TypeMap::new(),
        }
    }

    /// Inserts resource, returning previous value of the same type.
    pub fn insert<T: 'static>(&mut self, value: T) -> Option<T> {
        self.map.insert(value)
    }

    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.map.get()
    }

    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.map.get_mut()
    }

    pub fn get_or_default<T>(&mut self) -> &mut T
    where
        T: Default + 'static,
    {
        self.map.entry::<T>().or_insert_with(T::default)
    }

    pub fn get_or_else<T, F>(&mut self, f: F) -> &mut T
    where
        T: 'static,
        F: FnOnce() -> T,
    {
        self.map.entry::<T>().or_insert_with(f)
    }
}
